//! List command: print the builtin dataset table.

use cvget_core::dataset::builtin_datasets;

pub fn run_list() {
    for spec in builtin_datasets() {
        println!(
            "{:<10} {:<4} {:<24} {}",
            spec.name,
            spec.kind.as_str(),
            spec.archive,
            spec.url
        );
    }
}
