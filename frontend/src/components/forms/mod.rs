pub mod dynamic_field;
