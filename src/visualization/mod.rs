mod tables;

pub use tables::{
    format_distribution_table, format_result_table, format_run_summary, print_distribution_table,
    print_result_table, print_run_summary,
};
