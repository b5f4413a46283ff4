pub mod aircraft;

pub mod airport;

pub mod catalog;

pub mod config;

pub mod flight;

pub mod flight_phase;

pub mod generator;

pub mod geo;

pub mod map_bounds;

pub mod marker_cache;

pub mod scheduler;

pub mod sim_error;

pub mod simulation;

pub mod timer;

pub mod trail;
