//! Drop-migration assembly.
//!
//! Only the `(table, year, granularity)` target is needed: child names and the
//! router function name are derived from it exactly as the create side
//! derives them.

use tspart_core::PartitionTarget;

use super::{MigrationDocument, StatementCounts};

/// Assemble the drop document for a target.
///
/// Every statement uses `IF EXISTS ... CASCADE`, so the document succeeds
/// against a fully created, partially created or empty schema. Dropping the
/// function cascades to its trigger.
pub fn assemble_drop(target: &PartitionTarget) -> MigrationDocument {
    let tables: Vec<String> = target
        .buckets()
        .map(|bucket| drop_table(&bucket.suffix))
        .collect();
    let function = drop_function(&target.router_function_name());

    tracing::debug!(
        table = %target.table,
        year = target.year,
        count = tables.len(),
        "generated drop statements",
    );

    let content = format!("{}\n\n{}\n", tables.join("\n"), function);

    MigrationDocument {
        content,
        counts: StatementCounts {
            drop_tables: tables.len(),
            drop_functions: 1,
            ..StatementCounts::default()
        },
    }
}

fn drop_table(child: &str) -> String {
    format!("DROP TABLE IF EXISTS {child} CASCADE;")
}

fn drop_function(function_name: &str) -> String {
    format!("DROP FUNCTION IF EXISTS {function_name}() CASCADE;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_document_daily() {
        let doc = assemble_drop(&PartitionTarget::daily("ts_checks", 2016));
        let lines: Vec<&str> = doc.content.lines().collect();

        assert_eq!(doc.counts.drop_tables, 366);
        assert_eq!(doc.counts.drop_functions, 1);
        assert_eq!(lines[0], "DROP TABLE IF EXISTS ts_checks_2016_01_01 CASCADE;");
        assert_eq!(lines[365], "DROP TABLE IF EXISTS ts_checks_2016_12_31 CASCADE;");
        assert_eq!(lines[366], "");
        assert_eq!(
            lines[367],
            "DROP FUNCTION IF EXISTS on_ts_checks_insert_2016() CASCADE;"
        );
        assert!(doc.content.ends_with(";\n"));
    }

    #[test]
    fn test_every_statement_is_conditional() {
        let doc = assemble_drop(&PartitionTarget::daily("ts_logs", 2017));
        for line in doc.content.lines().filter(|l| !l.is_empty()) {
            assert!(line.contains(" IF EXISTS "), "{line}");
            assert!(line.ends_with(" CASCADE;"), "{line}");
        }
    }

    #[test]
    fn test_drop_document_monthly() {
        let doc = assemble_drop(&PartitionTarget::monthly("ts_metrics", 2016));
        assert_eq!(doc.counts.drop_tables, 12);
        assert!(doc.content.contains("DROP TABLE IF EXISTS ts_metrics_m12_2016 CASCADE;"));
    }
}
