pub mod parameter_mapper;
