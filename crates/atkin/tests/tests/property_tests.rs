#[path = "property/prime_queries.rs"]
mod prime_queries;

#[path = "property/visualization.rs"]
mod visualization;
