mod bundled_files;
mod corpus_issues;
mod export_round_trip;
