//! Closed enums with fixed wire strings.

use crate::record::wire_enum;

wire_enum! {
    /// Routing strategies for pool services.
    pub enum RoutingStrategy {
        Health => "Health",
        LeastCost => "LeastCost",
        LeastLatency => "LeastLatency",
        /// Route to the first healthy model in position order.
        Unrouted => "None",
        WeightedRandom => "WeightedRandom",
    }
}

wire_enum! {
    pub enum Modality {
        Audio => "Audio",
        Image => "Image",
        Text => "Text",
        Video => "Video",
    }
}

wire_enum! {
    pub enum PoolType {
        MultiModality => "MultiModality",
        SingleModality => "SingleModality",
    }
}

wire_enum! {
    pub enum ServiceType {
        Agentic => "Agentic",
        Pool => "Pool",
    }
}
