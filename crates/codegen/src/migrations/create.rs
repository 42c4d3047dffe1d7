//! Create-migration assembly.

use crate::context::GenerationContext;
use crate::indexes::generate_indexes;
use crate::partitions::generate_partitions;
use crate::router::generate_router;

use super::{MigrationDocument, StatementCounts};

/// Assemble the create document: child tables, indexes, router function and
/// trigger, in that order, separated by blank lines.
///
/// The assembler only concatenates; every fragment comes from its builder.
pub fn assemble_create(ctx: &GenerationContext) -> MigrationDocument {
    let tables = generate_partitions(ctx);
    let indexes = generate_indexes(ctx);
    let router = generate_router(ctx);

    let sections = [
        tables.join("\n"),
        indexes.join("\n"),
        router.function,
        router.trigger,
    ];

    let mut content = sections.join("\n\n");
    content.push('\n');

    MigrationDocument {
        content,
        counts: StatementCounts {
            create_tables: tables.len(),
            create_indexes: indexes.len(),
            router_branches: router.branch_count,
            create_functions: 1,
            create_triggers: 1,
            ..StatementCounts::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tspart_core::{PartitionSpec, PartitionTarget};

    fn checks_ctx() -> GenerationContext {
        let spec = PartitionSpec::from_columns(
            PartitionTarget::daily("ts_checks", 2016),
            ["check_id", "created"],
        )
        .unwrap();
        GenerationContext::from_spec_default(spec)
    }

    #[test]
    fn test_sections_appear_in_order() {
        let doc = assemble_create(&checks_ctx());
        let content = &doc.content;

        let last_table = content.find("create table ts_checks_2016_12_31").unwrap();
        let first_index = content.find("create index ").unwrap();
        let function = content.find("create or replace function").unwrap();
        let trigger = content.find("create trigger").unwrap();

        assert!(last_table < first_index);
        assert!(first_index < function);
        assert!(function < trigger);
    }

    #[test]
    fn test_sections_are_separated_by_blank_lines() {
        let doc = assemble_create(&checks_ctx());
        let content = &doc.content;

        assert!(content.contains("inherits (ts_checks);\n\ncreate index "));
        assert!(content.contains("(cluster_id,check_id,created);\n\ncreate or replace function"));
        assert!(content.contains("$$ language plpgsql;\n\ncreate trigger"));
        assert!(content.ends_with("execute procedure on_ts_checks_insert_2016();\n"));
        assert!(!content.ends_with("\n\n"));
    }

    #[test]
    fn test_counts() {
        let doc = assemble_create(&checks_ctx());
        assert_eq!(doc.counts.create_tables, 366);
        assert_eq!(doc.counts.create_indexes, 366);
        assert_eq!(doc.counts.router_branches, 366);
        assert_eq!(doc.counts.create_functions, 1);
        assert_eq!(doc.counts.create_triggers, 1);
        assert_eq!(doc.counts.drop_tables, 0);
    }

    #[test]
    fn test_assembly_is_deterministic() {
        let first = assemble_create(&checks_ctx());
        let second = assemble_create(&checks_ctx());
        assert_eq!(first, second);
    }
}
