//! Registered module intents.
//!
//! Modules are intents defined in code rather than in the dataset: their
//! patterns participate in training exactly like dataset patterns, and their
//! tag selects a response handler at reply time. Handlers are identified by
//! the closed [`HandlerKind`] enum so the full set is enumerable; the
//! handler implementations themselves (country lookups, movie search, HTTP
//! joke fetching, math evaluation, date parsing) live outside this crate.

use crate::corpus::intent::Intent;
use crate::util::levenshtein::fuzzy_contains;

/// Intent tag for country area questions.
pub const AREA_TAG: &str = "area";
/// Intent tag for country capital questions.
pub const CAPITAL_TAG: &str = "capital";
/// Intent tag for country currency questions.
pub const CURRENCY_TAG: &str = "currency";
/// Intent tag for math evaluation requests.
pub const MATH_TAG: &str = "math";
/// Intent tag for saving preferred movie genres.
pub const GENRES_TAG: &str = "movies genres";
/// Intent tag for movie search requests.
pub const MOVIES_TAG: &str = "movies search";
/// Intent tag for "already seen" movie follow-ups.
pub const MOVIES_ALREADY_TAG: &str = "already seen movie";
/// Intent tag for movie suggestions from saved preferences.
pub const MOVIES_DATA_TAG: &str = "movies search from data";
/// Intent tag for recalling the user's name.
pub const NAME_GETTER_TAG: &str = "name getter";
/// Intent tag for storing the user's name.
pub const NAME_SETTER_TAG: &str = "name setter";
/// Intent tag for random number requests.
pub const RANDOM_TAG: &str = "random number";
/// Intent tag for joke requests.
pub const JOKES_TAG: &str = "jokes";
/// Intent tag for advice requests.
pub const ADVICES_TAG: &str = "advices";

/// The closed set of response handlers a module can dispatch to.
///
/// Keeping this an enum (rather than function-valued fields) makes the
/// handler set enumerable and the module table plain data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HandlerKind {
    /// Country area lookup.
    CountryArea,
    /// Country capital lookup.
    CountryCapital,
    /// Country currency lookup.
    CountryCurrency,
    /// Arithmetic expression evaluation.
    Math,
    /// Save preferred movie genres.
    MovieGenres,
    /// Search a movie by genre.
    MovieSearch,
    /// Suggest a movie from saved preferences.
    MovieSearchFromData,
    /// Recall the stored user name.
    NameGetter,
    /// Store the user name.
    NameSetter,
    /// Generate a random number.
    RandomNumber,
    /// Fetch a joke.
    Jokes,
    /// Fetch a piece of advice.
    Advice,
}

/// An intent registered in code, with its response handler kind.
#[derive(Clone, Debug)]
pub struct Module {
    /// The intent tag.
    pub tag: &'static str,
    /// Training patterns.
    pub patterns: &'static [&'static str],
    /// Response templates for the handler.
    pub responses: &'static [&'static str],
    /// Which handler answers this intent.
    pub handler: HandlerKind,
}

impl Module {
    /// View this module as a plain intent for corpus assembly.
    pub fn to_intent(&self) -> Intent {
        Intent::new(
            self.tag,
            self.patterns.to_vec(),
            self.responses.to_vec(),
        )
    }
}

/// Movie genres recognized per locale.
pub const MOVIE_GENRES: &[&str] = &[
    "Action",
    "Adventure",
    "Animation",
    "Children",
    "Comedy",
    "Crime",
    "Documentary",
    "Drama",
    "Fantasy",
    "Film-Noir",
    "Horror",
    "Musical",
    "Mystery",
    "Romance",
    "Sci-Fi",
    "Thriller",
    "War",
    "Western",
];

/// Maximum edit distance for fuzzy genre matching.
const GENRE_MATCH_DISTANCE: usize = 2;

/// Find the known genres mentioned in a sentence, tolerating small typos.
pub fn find_movie_genres(content: &str) -> Vec<&'static str> {
    let upper = content.to_uppercase();
    MOVIE_GENRES
        .iter()
        .filter(|genre| fuzzy_contains(&upper, &genre.to_uppercase(), GENRE_MATCH_DISTANCE))
        .copied()
        .collect()
}

/// The modules registered for a locale.
///
/// Only English modules exist today; other locales get an empty list and
/// train purely from their dataset intents.
pub fn builtin_modules(locale: &str) -> Vec<Module> {
    match locale {
        "en" => english_modules(),
        _ => Vec::new(),
    }
}

fn english_modules() -> Vec<Module> {
    vec![
        Module {
            tag: AREA_TAG,
            patterns: &["What is the area of ", "Give me the area of "],
            responses: &["The area of %s is %gkm²"],
            handler: HandlerKind::CountryArea,
        },
        Module {
            tag: CAPITAL_TAG,
            patterns: &[
                "What is the capital of ",
                "What's the capital of ",
                "Give me the capital of ",
            ],
            responses: &["The capital of %s is %s"],
            handler: HandlerKind::CountryCapital,
        },
        Module {
            tag: CURRENCY_TAG,
            patterns: &[
                "Which currency is used in ",
                "Give me the used currency of ",
                "Give me the currency of ",
                "What is the currency of ",
            ],
            responses: &["The currency of %s is %s"],
            handler: HandlerKind::CountryCurrency,
        },
        Module {
            tag: MATH_TAG,
            patterns: &["Give me the result of ", "Calculate "],
            responses: &["The result is %s", "That makes %s"],
            handler: HandlerKind::Math,
        },
        Module {
            tag: GENRES_TAG,
            patterns: &[
                "My favorite movie genres are Comedy, Horror",
                "I like the Comedy, Horror genres",
                "I like movies about War",
                "I like Action movies",
            ],
            responses: &[
                "Great choices! I saved this movie genre information to your client.",
                "Understood, I saved this movie genre information to your client.",
            ],
            handler: HandlerKind::MovieGenres,
        },
        Module {
            tag: MOVIES_TAG,
            patterns: &[
                "Find me a movie about",
                "Give me a movie about",
                "Find me a film about",
            ],
            responses: &[
                "I found the movie “%s” for you, which is rated %.02f/5",
                "Sure, I found this movie “%s”, which is rated %.02f/5",
            ],
            handler: HandlerKind::MovieSearch,
        },
        Module {
            tag: MOVIES_ALREADY_TAG,
            patterns: &[
                "I already saw this movie",
                "I have already watched this film",
                "Oh I have already watched this movie",
                "I have already seen this movie",
            ],
            responses: &["Oh I see, here's another one “%s” which is rated %.02f/5"],
            handler: HandlerKind::MovieSearch,
        },
        Module {
            tag: MOVIES_DATA_TAG,
            patterns: &["I'm bored", "I don't know what to do"],
            responses: &["I propose you watch the %s movie “%s”, which is rated %.02f/5"],
            handler: HandlerKind::MovieSearchFromData,
        },
        Module {
            tag: NAME_GETTER_TAG,
            patterns: &["Do you know my name?"],
            responses: &["Your name is %s!"],
            handler: HandlerKind::NameGetter,
        },
        Module {
            tag: NAME_SETTER_TAG,
            patterns: &["My name is ", "You can call me "],
            responses: &["Great! Hi %s"],
            handler: HandlerKind::NameSetter,
        },
        Module {
            tag: RANDOM_TAG,
            patterns: &["Give me a random number", "Generate a random number"],
            responses: &["The number is %s"],
            handler: HandlerKind::RandomNumber,
        },
        Module {
            tag: JOKES_TAG,
            patterns: &["Tell me a joke", "Make me laugh"],
            responses: &["Here you go, %s", "Here's one, %s"],
            handler: HandlerKind::Jokes,
        },
        Module {
            tag: ADVICES_TAG,
            patterns: &["Give me an advice", "Advise me"],
            responses: &["Here you go, %s", "Here's one, %s", "Listen closely, %s"],
            handler: HandlerKind::Advice,
        },
    ]
}
