use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Get a file listing with hashes and macOS metadata
    Listfiles {
        /// Directory to walk. Can be provided multiple times
        #[arg(long)]
        root: Vec<String>,
        /// Number of threads hashing files
        #[arg(long, default_value_t = 4)]
        workers: usize,
        /// Skip files larger than this many bytes
        #[arg(long, default_value_t = 104857600)]
        max_size: u64,
        /// Output format. JSONL or CSV
        #[arg(long, default_value_t = String::from("JSONL"))]
        format: String,
        /// Output directory for storing results
        #[arg(long, default_value_t = String::from("./tmp"))]
        directory: String,
        /// Name of the collection
        #[arg(long, default_value_t = String::from("ishinobu_collection"))]
        name: String,
        /// GZIP compress results
        #[arg(long)]
        compress: bool,
    },
}
