pub mod floorplan;
pub mod input;
pub mod output;
