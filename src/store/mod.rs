pub mod shape_store;
