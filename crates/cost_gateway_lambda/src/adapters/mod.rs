pub mod aws;
pub mod control_plane;
