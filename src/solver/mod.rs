pub mod aco;
