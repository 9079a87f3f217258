//! Tests for command-line parsing and command execution

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use quadsplit::AlgorithmError;
    use quadsplit::algorithm::strategy::StrategyKind;
    use quadsplit::io::cli::{
        AlgorithmChoice, Cli, Command, GenerationArgs, Runner, SweepKind, generate_grid,
        load_grid, png_path,
    };
    use quadsplit::io::configuration::{DEFAULT_MAX_ITERATIONS, DEFAULT_SEED};
    use quadsplit::io::matrix::read_matrix;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn generation(rows: usize, cols: usize) -> GenerationArgs {
        GenerationArgs {
            rows,
            cols,
            seed: DEFAULT_SEED,
            min_cost: 0,
            max_cost: 9,
        }
    }

    // Tests the argument definitions are internally consistent
    // Verified by giving two arguments the same short flag
    #[test]
    fn test_command_definition() {
        Cli::command().debug_assert();
    }

    // Tests solve defaults with only a matrix file
    // Verified by changing default values to ensure defaults are used
    #[test]
    fn test_parse_solve_defaults() {
        let cli = Cli::parse_from(["quadsplit", "solve", "grid.txt"]);

        assert_eq!(cli.verbose, 0);
        assert!(cli.should_show_progress());
        let Command::Solve(args) = cli.command else {
            unreachable!("Expected solve command");
        };
        assert_eq!(args.source.file, Some(PathBuf::from("grid.txt")));
        assert_eq!(args.algorithm, AlgorithmChoice::All);
        assert_eq!(args.max_iterations, DEFAULT_MAX_ITERATIONS);
        assert!(args.png.is_none());
    }

    // Tests solve with every flag set
    // Verified by dropping the value enum on --algorithm
    #[test]
    fn test_parse_solve_all_flags() {
        let cli = Cli::parse_from([
            "quadsplit",
            "-vv",
            "solve",
            "--random",
            "--rows",
            "3",
            "--cols",
            "5",
            "--seed",
            "9",
            "-a",
            "two-stage",
            "-i",
            "7",
            "--png",
            "out/run",
            "--quiet",
        ]);

        assert_eq!(cli.verbose, 2);
        assert!(!cli.should_show_progress());
        let Command::Solve(args) = cli.command else {
            unreachable!("Expected solve command");
        };
        assert!(args.source.random);
        assert_eq!(args.source.generation.rows, 3);
        assert_eq!(args.source.generation.cols, 5);
        assert_eq!(args.source.generation.seed, 9);
        assert_eq!(args.algorithm, AlgorithmChoice::TwoStage);
        assert_eq!(args.max_iterations, 7);
        assert_eq!(args.png, Some(PathBuf::from("out/run")));
    }

    // Tests a matrix file and an inline matrix are mutually exclusive
    // Verified by removing conflicts_with_all
    #[test]
    fn test_sources_conflict() {
        let result = Cli::try_parse_from(["quadsplit", "solve", "grid.txt", "-m", "1 2;3 4"]);

        assert!(result.is_err());
    }

    // Tests sweep strategies parse from a comma-separated list
    // Verified by removing the value delimiter
    #[test]
    fn test_parse_sweep_strategies() {
        let cli = Cli::parse_from([
            "quadsplit",
            "sweep",
            "ranges",
            "--strategies",
            "greedy,exhaustive",
            "-t",
            "2",
        ]);

        let Command::Sweep(args) = cli.command else {
            unreachable!("Expected sweep command");
        };
        assert_eq!(args.kind, SweepKind::Ranges);
        assert_eq!(args.tasks, 2);
        assert_eq!(args.strategies, vec![StrategyKind::Greedy, StrategyKind::Exhaustive]);
        assert!(args.max_iterations.is_none());

        let unknown = ["quadsplit", "sweep", "sizes", "--strategies", "magic"];
        assert!(Cli::try_parse_from(unknown).is_err());
    }

    // Tests algorithm choices expand to strategies
    // Verified by leaving exhaustive out of All
    #[test]
    fn test_algorithm_choice_strategies() {
        assert_eq!(AlgorithmChoice::All.strategies(), StrategyKind::ALL.to_vec());
        assert_eq!(AlgorithmChoice::Greedy.strategies(), vec![StrategyKind::Greedy]);
        assert_eq!(AlgorithmChoice::Exhaustive.strategies(), vec![StrategyKind::Exhaustive]);
    }

    // Tests grid loading from each source
    // Verified by checking the random flag before the inline matrix
    #[test]
    fn test_load_grid_sources() {
        let inline = Cli::parse_from(["quadsplit", "solve", "-m", "1 2;3 4"]);
        let Command::Solve(args) = inline.command else {
            unreachable!("Expected solve command");
        };
        let grid = load_grid(&args.source).expect("inline matrix should load");
        assert_eq!(grid.to_rows(), vec![vec![1, 2], vec![3, 4]]);

        let random = Cli::parse_from(["quadsplit", "solve", "-r", "--rows", "2", "--cols", "6"]);
        let Command::Solve(args) = random.command else {
            unreachable!("Expected solve command");
        };
        let grid = load_grid(&args.source).expect("random matrix should generate");
        assert_eq!((grid.rows(), grid.cols()), (2, 6));

        let none = Cli::parse_from(["quadsplit", "solve"]);
        let Command::Solve(args) = none.command else {
            unreachable!("Expected solve command");
        };
        assert!(matches!(
            load_grid(&args.source),
            Err(AlgorithmError::InvalidParameter { parameter: "source", .. })
        ));
    }

    // Tests zero dimensions are rejected for generated grids
    // Verified by generating an empty grid instead
    #[test]
    fn test_generate_grid_rejects_zero_dimensions() {
        assert!(generate_grid(generation(0, 4)).is_err());
        assert!(generate_grid(generation(3, 4)).is_ok_and(|grid| grid.cell_count() == 12));
    }

    // Tests PNG paths append the algorithm to the prefix stem
    // Verified by appending after the extension
    #[test]
    fn test_png_path() {
        assert_eq!(png_path(Path::new("out/run"), "greedy"), PathBuf::from("out/run_greedy.png"));
        assert_eq!(
            png_path(Path::new("result.png"), "two-stage"),
            PathBuf::from("result_two-stage.png")
        );
    }

    // Tests the generate command writes a readable matrix
    // Verified by writing the matrix before generating it
    #[test]
    fn test_run_generate() {
        let dir = TempDir::new().expect("temporary directory");
        let output = dir.path().join("matrix.txt");
        let output_arg = output.to_string_lossy().to_string();

        let cli = Cli::parse_from([
            "quadsplit",
            "generate",
            &output_arg,
            "--rows",
            "3",
            "--cols",
            "2",
        ]);
        Runner::new(cli).run().expect("generate should succeed");

        let grid = read_matrix(&output).expect("written matrix should parse");
        assert_eq!((grid.rows(), grid.cols()), (3, 2));
    }

    // Tests solve writes one PNG per algorithm run
    // Verified by skipping PNG export
    #[test]
    fn test_run_solve_writes_png() {
        let dir = TempDir::new().expect("temporary directory");
        let prefix = dir.path().join("run");
        let prefix_arg = prefix.to_string_lossy().to_string();

        let cli = Cli::parse_from([
            "quadsplit",
            "-q",
            "solve",
            "-m",
            "1 2 3;4 5 6",
            "-a",
            "greedy",
            "--png",
            &prefix_arg,
        ]);
        Runner::new(cli).run().expect("solve should succeed");

        assert!(dir.path().join("run_greedy.png").exists());
        assert!(!dir.path().join("run_two-stage.png").exists());
    }
}
