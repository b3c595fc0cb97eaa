use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "luckyrookie", version, about = "LuckyRookie CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Guided breathing sessions
    Breathe {
        #[command(subcommand)]
        action: commands::breathe::BreatheAction,
    },
    /// Lucky times from a birth date
    Lucky {
        #[command(subcommand)]
        action: commands::lucky::LuckyAction,
    },
    /// Lucky colors for a weekday
    Color(commands::color::ColorArgs),
    /// Zodiac sign for a birthday
    Zodiac(commands::zodiac::ZodiacArgs),
    /// Open a fortune cookie
    Cookie,
    /// Horoscope reading
    Horoscope(commands::horoscope::HoroscopeArgs),
    /// Sunrise, sunset and golden hour for a city
    Sun(commands::sun::SunArgs),
    /// Lucky diary
    Diary {
        #[command(subcommand)]
        action: commands::diary::DiaryAction,
    },
    /// Clover balance and rewarded dates
    Clovers,
    /// Music search
    Music {
        #[command(subcommand)]
        action: commands::music::MusicAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// API credential management
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Breathe { action } => commands::breathe::run(action),
        Commands::Lucky { action } => commands::lucky::run(action),
        Commands::Color(args) => commands::color::run(args),
        Commands::Zodiac(args) => commands::zodiac::run(args),
        Commands::Cookie => commands::cookie::run(),
        Commands::Horoscope(args) => commands::horoscope::run(args),
        Commands::Sun(args) => commands::sun::run(args),
        Commands::Diary { action } => commands::diary::run(action),
        Commands::Clovers => commands::diary::clovers(),
        Commands::Music { action } => commands::music::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Auth { action } => commands::auth::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
