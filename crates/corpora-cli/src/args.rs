use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(name = "corpora", version, about = "Registry and finder for text-corpus metadata")]
pub struct Cli {
    /// Emit JSON output on stdout.
    #[arg(long, global = true)]
    pub json: bool,

    /// Store root directory (default: .corpora)
    #[arg(long, global = true, default_value = ".corpora")]
    pub store_root: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Rebuild the metadata tree from a form-response export.
    Build {
        /// Input path or URL: a JSON array of row objects, or a header row
        /// followed by value rows (spreadsheet values payload).
        input: String,

        /// Also keep the decoded raw rows as responses.json in the store.
        #[arg(long)]
        keep_responses: bool,
    },

    /// Find corpora by metadata attributes.
    Find(FindArgs),

    /// List the distinct values present for a metadata attribute.
    Discover {
        /// Attribute name, e.g. domain, languages, encoding.
        attribute: String,
    },

    /// Show the built-in language reference table.
    Languages {
        /// Export the table to languages.json in the store.
        #[arg(long)]
        export: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct FindArgs {
    /// Language ISO names, codes, or aliases.
    #[arg(long, num_args = 1..)]
    pub languages: Option<Vec<String>>,

    /// Entities that should have external access to the corpora.
    #[arg(long, num_args = 1..)]
    pub third_parties: Option<Vec<String>>,

    /// Knowledge area to which the corpus belongs.
    #[arg(long)]
    pub domain: Option<String>,

    /// Entity that has provided the corpus.
    #[arg(long)]
    pub provider: Option<String>,

    /// [yes/no] - the same data is present in more than one language.
    #[arg(long)]
    pub parallel: Option<String>,

    /// [yes/no] - the corpus is built from the addition of previous corpora.
    #[arg(long)]
    pub aggregated: Option<String>,

    /// [yes/no] - the corpus is parseable by document.
    #[arg(long)]
    pub document_level: Option<String>,

    /// [yes/no/na] - NA when the registrant does not know.
    #[arg(long)]
    pub publishable: Option<String>,

    /// Steps applied to an existing corpus state.
    #[arg(long, num_args = 1..)]
    pub actions: Option<Vec<String>>,

    /// Types of annotation that the corpus holds.
    #[arg(long, num_args = 1..)]
    pub annotation_types: Option<Vec<String>>,

    /// Encoding type of a corpus state.
    #[arg(long)]
    pub encoding: Option<String>,

    /// Format in which a corpus state is stored.
    #[arg(long)]
    pub format: Option<String>,

    /// Person who registered a corpus state.
    #[arg(long)]
    pub email_address: Option<String>,
}
