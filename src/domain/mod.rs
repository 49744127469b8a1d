// Domain layer: transport payloads exchanged with the admin, market and buyer services.

pub mod model;
