use contacts_config::Config;
use contacts_core::Pattern;
use tracing::info;

/// Strategy for displaying configuration information.
///
/// This strategy outputs the effective configuration:
/// - Config file location and whether it exists
/// - Extraction defaults (contact column, parallel rows)
/// - Inference settings and the recognised email patterns
/// - Output path
#[derive(Debug, Clone, Copy)]
pub struct InfoStrategy;

impl super::CommandStrategy for InfoStrategy {
    type Input = ();

    fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let path = Config::config_path()?;
        let config = Config::load_or_default()?;

        println!("=== contacts Configuration ===\n");

        println!("Config File:");
        println!("  Path: {}", path.display());
        if path.exists() {
            println!("  Status: Loaded");
        } else {
            info!("Config file missing, showing defaults");
            println!("  Status: Not found (defaults shown, run 'contacts init')");
        }
        println!();

        println!("Extraction:");
        println!(
            "  Contact Column: {}",
            config
                .extraction
                .contact_column
                .as_deref()
                .unwrap_or("(not set, pass --column)")
        );
        println!("  Parallel Rows: {}", config.extraction.parallel_rows);
        println!();

        println!("Inference:");
        println!("  Enabled: {}", config.inference.enabled);
        println!(
            "  Organization Column: {}",
            config.inference.organization_column
        );
        let patterns: Vec<&str> = Pattern::ALL.iter().map(|p| p.as_str()).collect();
        println!("  Patterns (priority order): {}", patterns.join(", "));
        println!();

        println!("Output:");
        println!("  Path: {}", config.output.path.display());

        Ok(())
    }
}
