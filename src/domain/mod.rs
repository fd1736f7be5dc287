// Domain layer: participants, teams and the ports the bot talks through.

pub mod model;
pub mod ports;
