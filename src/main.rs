use clap::{
    CommandFactory, Parser, Subcommand, ValueEnum,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use spotmeta::{
    cli, config, error,
    spotify::{
        personalize::{PersonalizeType, TimeRange},
        search::SearchType,
    },
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    /// Log filter, e.g. `debug` or `spotmeta=trace`; overrides RUST_LOG
    #[clap(long, global = true)]
    log_level: Option<String>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Manage the saved access token
    Token(TokenOptions),

    /// Show an album and its tracks
    Album { id: String },

    /// Look up several albums at once
    Albums {
        #[clap(required = true)]
        ids: Vec<String>,
    },

    /// Show an artist
    Artist { id: String },

    /// Show a track
    Track { id: String },

    /// Look up several tracks at once
    Tracks {
        #[clap(required = true)]
        ids: Vec<String>,
    },

    /// Show a playlist and its first tracks
    Playlist { id: String },

    /// Show the current user's profile
    Me,

    /// Show the current user's top artists or tracks
    Top(TopOptions),

    /// Search the catalog
    Search(SearchOptions),

    /// Show new album releases
    NewReleases {
        #[clap(long, default_value_t = 0)]
        offset: u32,
    },

    /// Show featured playlists
    Featured {
        #[clap(long, default_value_t = 0)]
        offset: u32,
    },

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct TokenOptions {
    #[command(subcommand)]
    pub command: TokenSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum TokenSubcommand {
    /// Save an access token for later runs
    Set {
        token: String,
        /// Authorization scheme (defaults to SPOTIFY_TOKEN_TYPE or Bearer)
        #[clap(long = "type")]
        token_type: Option<String>,
    },
    /// Show the saved token
    Show,
    /// Remove the saved token
    Clear,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum TopKind {
    Artists,
    Tracks,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum TimeRangeArg {
    Short,
    Medium,
    Long,
}

#[derive(Parser, Debug, Clone)]
pub struct TopOptions {
    #[clap(value_enum)]
    kind: TopKind,

    #[clap(long, value_enum)]
    time_range: Option<TimeRangeArg>,

    #[clap(long, default_value_t = 0)]
    offset: u32,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum SearchKind {
    Album,
    Artist,
    Playlist,
    Track,
}

#[derive(Parser, Debug, Clone)]
pub struct SearchOptions {
    query: String,

    #[clap(long = "type", value_enum, default_value = "track")]
    kind: SearchKind,

    #[clap(long, default_value_t = 0)]
    offset: u32,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

impl From<TopKind> for PersonalizeType {
    fn from(kind: TopKind) -> Self {
        match kind {
            TopKind::Artists => PersonalizeType::Artists,
            TopKind::Tracks => PersonalizeType::Tracks,
        }
    }
}

impl From<TimeRangeArg> for TimeRange {
    fn from(range: TimeRangeArg) -> Self {
        match range {
            TimeRangeArg::Short => TimeRange::Short,
            TimeRangeArg::Medium => TimeRange::Medium,
            TimeRangeArg::Long => TimeRange::Long,
        }
    }
}

impl From<SearchKind> for SearchType {
    fn from(kind: SearchKind) -> Self {
        match kind {
            SearchKind::Album => SearchType::Album,
            SearchKind::Artist => SearchType::Artist,
            SearchKind::Playlist => SearchType::Playlist,
            SearchKind::Track => SearchType::Track,
        }
    }
}

fn init_logging(level: Option<&str>) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(level) = level {
        builder.parse_filters(level);
    }
    builder.init();
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    match cli.command {
        Command::Token(opt) => match opt.command {
            TokenSubcommand::Set { token, token_type } => cli::token_set(token, token_type).await,
            TokenSubcommand::Show => cli::token_show().await,
            TokenSubcommand::Clear => cli::token_clear().await,
        },
        Command::Album { id } => cli::album(id).await,
        Command::Albums { ids } => cli::albums(ids).await,
        Command::Artist { id } => cli::artist(id).await,
        Command::Track { id } => cli::track(id).await,
        Command::Tracks { ids } => cli::tracks(ids).await,
        Command::Playlist { id } => cli::playlist(id).await,
        Command::Me => cli::me().await,
        Command::Top(opt) => {
            cli::top(opt.kind.into(), opt.time_range.map(Into::into), opt.offset).await
        }
        Command::Search(opt) => cli::search(opt.query, opt.kind.into(), opt.offset).await,
        Command::NewReleases { offset } => cli::new_releases(offset).await,
        Command::Featured { offset } => cli::featured(offset).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
