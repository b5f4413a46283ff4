/// Tunable knobs for the simulation. The defaults mirror the production
/// values: a pool of 20 flights, a 40-point trail, and refresh cadences that
/// slow down while the application is backgrounded.
#[derive(Clone, Debug)]
pub struct SimConfig {
    /// Number of live flights kept in the pool at all times.
    pub pool_size: usize,
    /// Maximum positions retained in the selected flight's trail.
    pub trail_capacity: usize,
    /// Great-circle samples per route (the route holds `segments + 1` points).
    pub route_segments: usize,
    /// Attempts to re-draw a destination that collides with the origin.
    pub destination_retries: u32,
    /// Shortest scheduled flight, in minutes.
    pub min_duration_min: i64,
    /// Helicopters only fly to airports within this range of their origin.
    pub rotary_range_km: f64,

    pub in_view_interval_ms: u64,
    pub in_view_background_interval_ms: u64,
    pub out_of_view_interval_ms: u64,
    pub out_of_view_background_interval_ms: u64,
    pub selected_interval_ms: u64,
    pub selected_background_interval_ms: u64,

    /// Worker threads the tick bodies run on.
    pub workers: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            pool_size: 20,
            trail_capacity: 40,
            route_segments: 60,
            destination_retries: 8,
            min_duration_min: 5,
            rotary_range_km: 400.0,
            in_view_interval_ms: 15_000,
            in_view_background_interval_ms: 60_000,
            out_of_view_interval_ms: 60_000,
            out_of_view_background_interval_ms: 300_000,
            selected_interval_ms: 5_000,
            selected_background_interval_ms: 60_000,
            workers: 4,
        }
    }
}
