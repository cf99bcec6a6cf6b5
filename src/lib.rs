// Library exports for kinsweep
pub mod match_grouper;
pub mod overlap_sweep;
pub mod pipeline;
pub mod roster;
pub mod roster_io;
pub mod segment;
pub mod triang;
pub mod triang_index;
pub mod triang_io;
