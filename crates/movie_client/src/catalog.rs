use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

/// Built-in title pool. These double as lookup keys, so they must match the
/// pt-BR catalog the local API serves.
const DEFAULT_TITLES: &[&str] = &[
    "Vingadores: Ultimato",
    "Titanic",
    "Avatar",
    "Pantera Negra",
    "Homem-Aranha: Sem Volta Para Casa",
    "Jurassic Park",
    "O Rei Leão",
    "Frozen",
    "Toy Story",
    "Procurando Nemo",
    "Shrek",
    "Harry Potter",
    "Senhor dos Anéis",
    "Star Wars",
    "Matrix",
    "Pulp Fiction",
    "Forrest Gump",
    "O Poderoso Chefão",
    "Cidade de Deus",
    "Parasita",
    "Coringa",
    "Interestelar",
    "Inception",
    "Gladiador",
    "O Cavaleiro das Trevas",
    "Clube da Luta",
    "Seven",
    "Goodfellas",
    "Scarface",
    "Taxi Driver",
    "Casablanca",
    "Cidadão Kane",
    "Psicose",
    "Vertigo",
    "Cantando na Chuva",
    "E.T.",
    "Tubarão",
    "Rocky",
    "Rambo",
    "Terminator",
    "Alien",
    "Blade Runner",
    "Mad Max",
    "John Wick",
    "Velozes e Furiosos",
    "Missão Impossível",
    "James Bond",
    "Indiana Jones",
    "Piratas do Caribe",
    "Transformers",
];

#[derive(Debug, Error)]
#[error("title catalog is empty")]
pub struct EmptyCatalog;

/// Immutable pool of candidate titles for the roulette.
///
/// Construction rejects empty pools, so every draw has something to pick;
/// repeats across draws are expected and fine.
#[derive(Debug, Clone)]
pub struct TitleCatalog {
    titles: Vec<String>,
}

impl Default for TitleCatalog {
    fn default() -> Self {
        TitleCatalog {
            titles: DEFAULT_TITLES.iter().map(|title| (*title).to_owned()).collect(),
        }
    }
}

impl TitleCatalog {
    /// Builds a catalog from caller-supplied titles. Blank entries are
    /// dropped; at least one real title must remain.
    pub fn new(titles: Vec<String>) -> Result<Self, EmptyCatalog> {
        let titles: Vec<String> = titles
            .into_iter()
            .map(|title| title.trim().to_owned())
            .filter(|title| !title.is_empty())
            .collect();
        if titles.is_empty() {
            return Err(EmptyCatalog);
        }
        Ok(TitleCatalog { titles })
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    /// Draws a uniformly random title with the thread-local RNG.
    pub fn random_title(&self) -> &str {
        self.random_title_with(&mut rand::thread_rng())
    }

    /// Draws a uniformly random title from the given RNG, so scripted and
    /// test draws can be seeded.
    pub fn random_title_with<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        self.titles
            .choose(rng)
            .map(String::as_str)
            .expect("constructors reject empty catalogs")
    }
}
