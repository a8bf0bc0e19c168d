use dockhand_model::{LayerLine, LayerRecord, SizeReport};

/// `{:.1}MB` with a fixed suffix regardless of magnitude.
pub fn human_size(bytes: u64) -> String {
    format!("{:.1}MB", bytes as f64 / (1024.0 * 1024.0))
}

/// Aggregates layer records in input order. Records without a size carry no
/// filesystem delta and are skipped, in the total as well as in the layer
/// list.
pub fn summarize_layers(records: &[LayerRecord]) -> SizeReport {
    let mut total_bytes = 0u64;
    let mut layers = Vec::new();
    for record in records {
        let Some(size_bytes) = record.size_bytes else {
            continue;
        };
        total_bytes += size_bytes;
        layers.push(LayerLine {
            command: record.command.clone(),
            size_bytes,
            human_size: human_size(size_bytes),
        });
    }
    SizeReport {
        total_bytes,
        layers,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(command: &str, size_bytes: Option<u64>) -> LayerRecord {
        LayerRecord {
            command: command.to_string(),
            size_bytes,
        }
    }

    #[test]
    fn sums_sized_layers_in_input_order() {
        let report = summarize_layers(&[
            record("FROM alpine", Some(1_048_576)),
            record("RUN make", Some(2_097_152)),
        ]);
        assert_eq!(report.total_bytes, 3_145_728);
        assert_eq!(report.layers.len(), 2);
        assert_eq!(report.layers[0].human_size, "1.0MB");
        assert_eq!(report.layers[1].human_size, "2.0MB");
        assert_eq!(report.layers[0].command, "FROM alpine");
    }

    #[test]
    fn skips_records_without_a_size() {
        let report = summarize_layers(&[
            record("LABEL maintainer=x", None),
            record("COPY . .", Some(512)),
        ]);
        assert_eq!(report.total_bytes, 512);
        assert_eq!(report.layers.len(), 1);
        assert_eq!(report.layers[0].command, "COPY . .");
    }

    #[test]
    fn empty_input_yields_empty_report() {
        let report = summarize_layers(&[]);
        assert_eq!(report.total_bytes, 0);
        assert!(report.layers.is_empty());
    }

    #[test]
    fn total_equals_sum_of_emitted_layers() {
        let report = summarize_layers(&[
            record("a", Some(1)),
            record("b", None),
            record("c", Some(2)),
            record("d", Some(3)),
        ]);
        let sum: u64 = report.layers.iter().map(|l| l.size_bytes).sum();
        assert_eq!(report.total_bytes, sum);
    }

    #[test]
    fn human_size_keeps_the_mb_suffix_at_every_magnitude() {
        assert_eq!(human_size(0), "0.0MB");
        assert_eq!(human_size(1_048_576), "1.0MB");
        assert_eq!(human_size(1_572_864), "1.5MB");
        assert_eq!(human_size(2_147_483_648), "2048.0MB");
    }
}
