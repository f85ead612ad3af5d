pub mod part_flow;
pub mod plan_store;

pub use part_flow::{generate_part, part_error_marker, PartRequest, GENERATION_TEMPERATURE};
pub use plan_store::{PlanCommand, PlanEdit, PlanStore};
