// Business domains
pub mod fact_check;
