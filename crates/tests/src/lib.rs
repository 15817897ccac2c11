//! # Integration Tests
//!
//! Integration and end-to-end tests.
//!
//! Covers:
//! - Contract snapshot tests
//! - Log file -> measures -> file sink runs

#[cfg(test)]
mod contract_tests {
    use contracts::{Measure, MeasureDescriptor};
    use measures::sent_fcomposition_messages;

    #[test]
    fn test_contracts_compile() {
        let _ = contracts::ConfigVersion::V1;
    }

    #[test]
    fn test_descriptor_json_shape() {
        let descriptor = MeasureDescriptor::new(
            "graphsearch.forward.message.FCompositionMessage",
            10.0,
            1000.0,
        );
        let json = serde_json::to_value(&descriptor).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "message_type_key": "graphsearch.forward.message.FCompositionMessage",
                "period": 10.0,
                "simulation_time": 1000.0,
            })
        );
    }

    #[test]
    fn test_factory_descriptor() {
        for (period, simulation_time) in [(10.0, 1000.0), (0.0, 0.0), (-1.0, 5.0)] {
            let m = sent_fcomposition_messages(period, simulation_time);
            assert_eq!(
                m.descriptor(),
                &MeasureDescriptor::new(
                    "graphsearch.forward.message.FCompositionMessage",
                    period,
                    simulation_time
                )
            );
        }
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::fs;
    use std::io::Write;
    use std::path::Path;

    use config_loader::{ConfigFormat, ConfigLoader};
    use contracts::MeasureReport;
    use measures::{LogScanner, MeasureRegistry, MeasureSet};
    use reporter::{create_reporter, DeliveryStats};

    const RUN_A: &str = "\
0 [main] INFO  simulation.Simulation  - Peer 0 initializing 00,000
12 [main] DEBUG graphcreation.collisionbased.CollisionGraphCreator  - Peer 0 forwarding graphsearch.forward.message.FCompositionMessage to [S1:1, S2:2] 02,500
15 [main] DEBUG graphcreation.collisionbased.CollisionGraphCreator  - Peer 1 forwarding graphsearch.backward.message.BCompositionMessage to [S0:0] 03,000
18 [main] DEBUG graphcreation.collisionbased.CollisionGraphCreator  - Peer 1 forwarding graphsearch.forward.message.FCompositionMessage to [S3:3] 11,000
21 [main] DEBUG graphsearch.forward.ForwardComposition  - Peer 2 forwarding invalid composition message to [S0:0] 12,000
25 [main] DEBUG graphcreation.collisionbased.CollisionGraphCreator  - Peer 2 forwarding graphcreation.collisionbased.message.CollisionMessage to [S1:1] 25,000
";

    const RUN_B: &str = "\
30 [main] DEBUG graphcreation.collisionbased.CollisionGraphCreator  - Peer 3 forwarding graphsearch.forward.message.FCompositionMessage to [S4:4] 29,999
31 [main] DEBUG graphcreation.collisionbased.CollisionGraphCreator  - Peer 3 forwarding graphsearch.forward.message.FCompositionMessage to [S5:5] 30,000
32 [main] DEBUG graphcreation.collisionbased.CollisionGraphCreator  - Peer 3 forwarding graphsearch.forward.message.FCompositionMessage to [S6:6] 31,500
";

    fn experiment(output: &Path) -> String {
        format!(
            r#"
[simulation]
period = 10.0
simulation_time = 30.0

[[measures]]
name = "SentFCompositionMessages"

[[measures]]
name = "SentBCompositionMessages"

[[measures]]
name = "ForwardedCollisions"
message_type = "graphcreation.collisionbased.message.CollisionMessage"

[[sinks]]
name = "results"
sink_type = "file"
[sinks.params]
base_path = "{}"
"#,
            output.display()
        )
    }

    fn write_log(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    /// End-to-end: experiment file -> two log files -> file sink
    #[tokio::test]
    async fn test_e2e_log_to_files() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("results");
        let blueprint =
            ConfigLoader::load_from_str(&experiment(&output), ConfigFormat::Toml).unwrap();

        let mut set = MeasureSet::from_blueprint(&blueprint, &MeasureRegistry::builtin()).unwrap();
        let scanner = LogScanner::strict(blueprint.simulation.strict);

        let mut scan = scanner
            .scan_file(&write_log(dir.path(), "a.log", RUN_A), &mut set)
            .await
            .unwrap();
        scan.merge(
            &scanner
                .scan_file(&write_log(dir.path(), "b.log", RUN_B), &mut set)
                .await
                .unwrap(),
        );

        assert_eq!(scan.files, 2);
        assert_eq!(scan.lines, 9);
        assert_eq!(scan.events, 7);
        assert_eq!(scan.ignored, 2);
        assert_eq!(scan.parse_errors, 0);

        let reports = set.reports();
        let reporter = create_reporter(&blueprint.sinks).unwrap();
        reporter.dispatch(&reports).await;
        let delivered = reporter.shutdown().await;
        assert_eq!(delivered[0].1, DeliveryStats { written: 3, failed: 0 });

        // 2.5 | 11.0 | 29.999, 30.0 ; 31.5 is past the horizon
        let dat = fs::read_to_string(output.join("SentFCompositionMessages.dat")).unwrap();
        let rows: Vec<&str> = dat.lines().filter(|l| !l.starts_with('#')).collect();
        assert_eq!(rows, vec!["10\t1\t1", "20\t1\t2", "30\t2\t4"]);

        let json = fs::read_to_string(output.join("SentFCompositionMessages.json")).unwrap();
        let report: MeasureReport = serde_json::from_str(&json).unwrap();
        assert_eq!(report.total, 4);
        assert_eq!(report.out_of_range, 1);
        assert_eq!(report.total_destinations, 5);
        assert_eq!(report.by_peer.get("3"), Some(&2));

        let collisions: MeasureReport = serde_json::from_str(
            &fs::read_to_string(output.join("ForwardedCollisions.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(collisions.total, 1);
        assert_eq!(collisions.samples[2].count, 1);
    }

    #[tokio::test]
    async fn test_e2e_strict_mode_stops_at_bad_line() {
        let dir = tempfile::tempdir().unwrap();
        let log = write_log(
            dir.path(),
            "bad.log",
            &format!("{RUN_A}40 [main] DEBUG X  - Peer 9 forwarding a.b.Msg to [S1:1] 1,2.3\n"),
        );

        let mut set = MeasureSet::new();
        set.push(measures::sent_fcomposition_messages(10.0, 30.0));

        let lenient = LogScanner::new().scan_file(&log, &mut set).await.unwrap();
        assert_eq!(lenient.parse_errors, 1);

        let err = LogScanner::strict(true)
            .scan_file(&log, &mut set)
            .await
            .unwrap_err();
        assert!(matches!(err, contracts::ContractError::LogParse { line_no: 7, .. }));
    }
}
