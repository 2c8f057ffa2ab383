pub mod stage_form;
pub mod stages;
