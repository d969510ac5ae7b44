use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use movie_client::card::{
    POSTER_FALLBACK_LABEL, PROVIDERS_HEADING, PROVIDERS_NONE_IN_REGION, PROVIDERS_UNAVAILABLE,
};
use movie_client::{load_settings, MovieApi, MovieCard, PosterSource, ProviderDisplay};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Parser, Debug)]
struct Args {
    /// Base URL of the movie lookup API; overrides file and env settings.
    #[arg(long)]
    api_url: Option<String>,
    /// Newline-separated title list replacing the built-in catalog.
    #[arg(long)]
    titles_file: Option<PathBuf>,
    /// Seed the draw for reproducible picks.
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(api_url) = args.api_url {
        settings.api_url = api_url;
    }
    if let Some(path) = &args.titles_file {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading title list {}", path.display()))?;
        settings.titles = Some(raw.lines().map(str::to_owned).collect());
    }
    let catalog = settings.catalog()?;

    let title = match args.seed {
        Some(seed) => catalog
            .random_title_with(&mut StdRng::seed_from_u64(seed))
            .to_owned(),
        None => catalog.random_title().to_owned(),
    };
    println!("Drew: {title}");

    let api = MovieApi::new(settings.api_url);
    let record = match api.lookup(&title).await {
        Ok(record) => record,
        Err(err) => {
            tracing::error!(%title, error = %err, "movie lookup failed");
            return Err(anyhow!(
                "could not fetch \"{title}\" from {}; is the movie API running?",
                api.base_url()
            ));
        }
    };

    let card = MovieCard::from_record(record);
    println!();
    println!("{}", render_card_text(&card, &api));
    Ok(())
}

/// Plain-text rendition of a movie card, mirroring what the GUI shows.
fn render_card_text(card: &MovieCard, api: &MovieApi) -> String {
    let providers_line = match &card.providers {
        ProviderDisplay::Unavailable => PROVIDERS_UNAVAILABLE.to_owned(),
        ProviderDisplay::NoneInRegion => {
            format!("{PROVIDERS_HEADING} {PROVIDERS_NONE_IN_REGION}")
        }
        ProviderDisplay::Names(names) => {
            format!("{PROVIDERS_HEADING} {}", names.join(", "))
        }
    };
    let poster_line = match &card.poster {
        PosterSource::Remote(url) => format!("Poster: {}", api.resolve_url(url)),
        PosterSource::Placeholder => POSTER_FALLBACK_LABEL.to_owned(),
    };

    format!(
        "{title} ({year})\n{rating}\n\n{synopsis}\n\n{providers_line}\n{poster_line}",
        title = card.title,
        year = card.year,
        rating = card.rating_label,
        synopsis = card.synopsis,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use movie_client::card::SYNOPSIS_FALLBACK;

    fn api() -> MovieApi {
        MovieApi::new("http://localhost:3000")
    }

    fn card() -> MovieCard {
        MovieCard {
            title: "Cidade de Deus".to_owned(),
            rating_label: "⭐ 8.7".to_owned(),
            year: 2002,
            synopsis: "Buscapé cresce numa favela carioca.".to_owned(),
            poster: PosterSource::Remote("/posters/cidade-de-deus.jpg".to_owned()),
            providers: ProviderDisplay::Names(vec![
                "Netflix".to_owned(),
                "HBO Max".to_owned(),
            ]),
        }
    }

    #[test]
    fn renders_every_card_section_in_order() {
        let text = render_card_text(&card(), &api());

        assert_eq!(
            text,
            "Cidade de Deus (2002)\n\
             ⭐ 8.7\n\
             \n\
             Buscapé cresce numa favela carioca.\n\
             \n\
             Where to watch: Netflix, HBO Max\n\
             Poster: http://localhost:3000/posters/cidade-de-deus.jpg"
        );
    }

    #[test]
    fn renders_fallbacks_for_missing_synopsis_poster_and_providers() {
        let mut bare = card();
        bare.synopsis = SYNOPSIS_FALLBACK.to_owned();
        bare.poster = PosterSource::Placeholder;
        bare.providers = ProviderDisplay::Unavailable;

        let text = render_card_text(&bare, &api());

        assert!(text.contains(SYNOPSIS_FALLBACK));
        assert!(text.contains(PROVIDERS_UNAVAILABLE));
        assert!(text.ends_with(POSTER_FALLBACK_LABEL));
    }

    #[test]
    fn renders_region_gap_with_the_providers_heading() {
        let mut regionless = card();
        regionless.providers = ProviderDisplay::NoneInRegion;

        let text = render_card_text(&regionless, &api());

        assert!(text.contains("Where to watch: Not available in Brazil."));
    }

    #[test]
    fn absolute_poster_urls_pass_through_unchanged() {
        let mut remote = card();
        remote.poster =
            PosterSource::Remote("https://image.tmdb.org/t/p/w500/cidade.jpg".to_owned());

        let text = render_card_text(&remote, &api());

        assert!(text.ends_with("Poster: https://image.tmdb.org/t/p/w500/cidade.jpg"));
    }
}
