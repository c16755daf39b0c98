use clap::{Parser, Subcommand};
use log::info;

use artistlookup::{
    clients::errors::Result,
    lookup::{ConfigBuilder, Lookup},
};

#[derive(Parser)]
#[command(name = "artistlookup")]
#[command(version, about = "Look up artist metadata in the Spotify catalog", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the follower count of an artist
    Followers { artist: String },
    /// Print the genres of an artist
    Genres { artist: String },
    /// Save the artist profile to artist_info.json
    Info { artist: String },
    /// Print the top tracks of an artist and save their cover urls to top_track_imgs.json
    TopTracks { artist: String },
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    info!("Authorizing client ...");
    let config = ConfigBuilder::new().build().await?;
    let lookup = Lookup::new(config);

    let output = match &cli.command {
        Commands::Followers { artist } => lookup.followers(artist).await?,
        Commands::Genres { artist } => lookup.genres(artist).await?,
        Commands::Info { artist } => lookup.info(artist).await?,
        Commands::TopTracks { artist } => lookup.top_tracks(artist).await?,
    };
    println!("{output}");
    Ok(())
}
