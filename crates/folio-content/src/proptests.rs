//! Property-based tests for splitting and the frontmatter format.
