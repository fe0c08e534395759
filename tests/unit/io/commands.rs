//! Tests for command script parsing and execution

#[cfg(test)]
mod tests {
    use std::io::Write;
    use wavetile::WaveError;
    use wavetile::algorithm::executor::{CollapseOutcome, SolveOutcome, WaveSolver};
    use wavetile::io::commands::{Command, CommandResult, execute_all, summarize};
    use wavetile::tiles::catalog::{BaseTile, Catalog};
    use wavetile::tiles::sockets::{Edge, Signature};

    fn checkerboard() -> WaveSolver {
        let tiles = [("A", [1, 2, 3, 4], [0, 0]), ("B", [3, 4, 1, 2], [1, 0])].map(
            |(name, values, source)| BaseTile {
                name: name.to_string(),
                weight: 1,
                rotation_mask: 1,
                sockets: values.map(Signature),
                source,
            },
        );
        let catalog = Catalog::build(&tiles, false).expect("valid tile set");
        WaveSolver::new(catalog, 2, 2, 3).expect("valid dimensions")
    }

    // Tests every keyword parses with its arguments
    // Verified by swapping x and y
    #[test]
    fn test_parse_line_keywords() {
        let parse = |line: &str| Command::parse_line(1, line).expect("valid line");

        assert_eq!(parse("collapse 1 2"), Some(Command::Collapse { x: 1, y: 2 }));
        assert_eq!(
            parse("FORCE 0 -1 road_end"),
            Some(Command::Force {
                x: 0,
                y: -1,
                name: "road_end".to_string()
            })
        );
        assert_eq!(
            parse("variant 3 4 1 0"),
            Some(Command::Variant {
                x: 3,
                y: 4,
                column: 1,
                row: 0
            })
        );
        assert_eq!(parse("  step  "), Some(Command::Step));
        assert_eq!(parse("Run"), Some(Command::Run));
        assert_eq!(parse("settle"), Some(Command::Settle));
        assert_eq!(parse("describe 0 0"), Some(Command::Describe { x: 0, y: 0 }));
        assert_eq!(
            parse("compatible A left"),
            Some(Command::Compatible {
                name: "A".to_string(),
                edge: Edge::Left
            })
        );
        assert_eq!(parse("   "), None);
        assert_eq!(parse("# only a comment"), None);
        assert_eq!(parse("step # trailing"), Some(Command::Step));
    }

    // Tests tile names keep their inner spaces
    // Verified by reading the name as a single token
    #[test]
    fn test_names_with_spaces() {
        let tiles = [("road bend", [1, 1, 1, 1])].map(|(name, values)| BaseTile {
            name: name.to_string(),
            weight: 1,
            rotation_mask: 1,
            sockets: values.map(Signature),
            source: [0, 0],
        });
        let catalog = Catalog::build(&tiles, false).expect("valid tile set");
        let mut solver = WaveSolver::new(catalog, 2, 1, 0).expect("valid dimensions");

        let force = Command::parse_line(1, "force 1 0  road bend ").expect("valid line");
        assert_eq!(
            force,
            Some(Command::Force {
                x: 1,
                y: 0,
                name: "road bend".to_string()
            })
        );
        assert_eq!(
            Command::parse_line(2, "compatible road bend bottom").expect("valid line"),
            Some(Command::Compatible {
                name: "road bend".to_string(),
                edge: Edge::Bottom
            })
        );

        let result = force
            .expect("command present")
            .execute(&mut solver)
            .expect("in bounds");
        assert!(matches!(
            result,
            CommandResult::Collapse(CollapseOutcome::Collapsed { reality: 0, .. })
        ));
        assert!(Command::parse_line(3, "compatible bottom").is_err());
        assert!(Command::parse_line(3, "force 0 0   ").is_err());
    }

    // Tests malformed lines report their line number
    // Verified by skipping unknown keywords
    #[test]
    fn test_parse_line_errors() {
        for line in ["jump 1 2", "collapse 1", "collapse x 2", "variant 0 0 -1 0", "compatible A up"] {
            let error = Command::parse_line(4, line).expect_err("invalid line");
            assert!(
                matches!(error, WaveError::InvalidParameter { .. }),
                "{line}: {error}"
            );
            assert!(error.to_string().contains("line 4"), "{line}: {error}");
        }
    }

    // Tests whole scripts skip blank and comment lines
    // Verified by numbering only non-blank lines
    #[test]
    fn test_parse_script() {
        let script = "# setup\nforce 0 0 A\n\nrun\n";
        assert_eq!(
            Command::parse_script(script).expect("valid script"),
            vec![
                Command::Force {
                    x: 0,
                    y: 0,
                    name: "A".to_string()
                },
                Command::Run
            ]
        );

        let error = Command::parse_script("step\n\nbogus\n").expect_err("invalid script");
        assert!(error.to_string().contains("line 3"));
    }

    // Tests reading scripts from disk
    // Verified by returning an empty script for missing files
    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(b"step\nrun\n").expect("write script");

        let commands = Command::from_file(file.path()).expect("valid script");
        assert_eq!(commands, vec![Command::Step, Command::Run]);

        let missing = file.path().with_extension("missing");
        assert!(matches!(
            Command::from_file(&missing),
            Err(WaveError::FileSystem { .. })
        ));
    }

    // Tests commands drive the solver
    // Verified by executing commands against a cloned solver
    #[test]
    fn test_execute_commands() {
        let mut solver = checkerboard();
        let commands = Command::parse_script("force 0 0 A\nstep\nrun\n").expect("valid script");

        let results = execute_all(&mut solver, &commands).expect("commands succeed");

        assert!(matches!(
            results.first(),
            Some(CommandResult::Collapse(CollapseOutcome::Collapsed { reality: 0, .. }))
        ));
        assert_eq!(results.get(1), Some(&CommandResult::Step(None)));
        assert_eq!(
            results.get(2),
            Some(&CommandResult::Run(SolveOutcome::Complete { steps: 0 }))
        );
        assert!(solver.is_complete());
        let messages: Vec<String> = results.iter().map(ToString::to_string).collect();
        assert_eq!(
            messages,
            vec![
                "collapsed (0, 0) to 0, 3 removals, 0 contradictions",
                "no open cell left",
                "complete after 0 steps",
            ]
        );
    }

    // Tests lookup failures are results, bounds failures are errors
    // Verified by turning lookup misses into errors
    #[test]
    fn test_execute_failures() {
        let mut solver = checkerboard();

        let miss = Command::Force {
            x: 1,
            y: 1,
            name: "C".to_string(),
        }
        .execute(&mut solver)
        .expect("in bounds");
        assert_eq!(miss.to_string(), "no variant named C");

        let no_match = Command::Variant {
            x: 0,
            y: 1,
            column: 5,
            row: 5,
        }
        .execute(&mut solver)
        .expect("in bounds");
        assert_eq!(
            no_match.to_string(),
            "no candidate of (0, 1) comes from sheet cell [5, 5]"
        );

        let outside = Command::Collapse { x: 2, y: 0 }.execute(&mut solver);
        assert!(matches!(outside, Err(WaveError::OutOfBounds { .. })));
        assert_eq!(solver.steps(), 0);
    }

    // Tests diagnostic commands produce text without changing the grid
    // Verified by collapsing the described cell
    #[test]
    fn test_diagnostic_commands() {
        let mut solver = checkerboard();

        let described = Command::Describe { x: 1, y: 1 }
            .execute(&mut solver)
            .expect("in bounds");
        assert!(described.to_string().starts_with("Wave{realities=2, x=1, y=1}"));

        let compatible = Command::Compatible {
            name: "A".to_string(),
            edge: Edge::Right,
        }
        .execute(&mut solver)
        .expect("diagnostic succeeds");
        let text = compatible.to_string();
        assert!(text.starts_with("Compatible with A on edge Right:"));
        assert_eq!(text.lines().count(), 2);
        assert!(text.contains('B'));

        let settled = Command::Settle.execute(&mut solver).expect("settle succeeds");
        assert_eq!(
            settled.to_string(),
            "settled with 0 removals, 0 collapsed, 0 contradictions"
        );
        assert_eq!(solver.grid().collapsed_count(), 0);
    }

    // Tests script results fold into one propagation summary
    // Verified by keeping only the last report
    #[test]
    fn test_summarize() {
        let mut solver = checkerboard();
        let commands =
            Command::parse_script("force 0 0 A\nsettle\ndescribe 0 0\n").expect("valid script");

        let results = execute_all(&mut solver, &commands).expect("commands succeed");

        assert!(results.first().and_then(CommandResult::propagation).is_some());
        assert!(results.get(2).and_then(CommandResult::propagation).is_none());
        let summary = summarize(&results);
        assert_eq!(summary.removals, 3);
        assert_eq!(summary.newly_collapsed.len(), 3);
        assert!(summary.contradictions.is_empty());
        assert_eq!(summary.epoch, solver.epoch());
        assert!(summarize(&[]).newly_collapsed.is_empty());
    }
}
