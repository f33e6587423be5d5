pub mod experience;
pub mod features;
pub mod model;
pub mod predict;
