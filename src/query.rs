use clap::ValueEnum;

/// Which media fields a page query asks for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum QueryTemplate {
    /// Every media field plus the relation and studio graphs.
    #[default]
    Full,
    /// Media fields only, no relations or studios.
    Basic,
}

impl QueryTemplate {
    pub fn document(&self) -> &'static str {
        match self {
            QueryTemplate::Full => FULL_QUERY,
            QueryTemplate::Basic => BASIC_QUERY,
        }
    }
}

const FULL_QUERY: &str = r#"
query ($page: Int, $perPage: Int) {
    Page(page: $page, perPage: $perPage) {
        media(type: ANIME, sort: ID) {
            id
            idMal
            title { romaji english native }
            type
            format
            status
            description(asHtml: false)
            startDate { year month day }
            endDate { year month day }
            season
            seasonYear
            seasonInt
            episodes
            duration
            countryOfOrigin
            source
            hashtag
            coverImage { large medium color }
            bannerImage
            genres
            averageScore
            meanScore
            isAdult
            trailer { id site thumbnail }
            synonyms
            relations {
                edges {
                    id
                    relationType
                    node {
                        id
                        title { romaji english native }
                        type
                        format
                        status
                        coverImage { large color }
                    }
                }
            }
            studios {
                edges {
                    id
                    isMain
                    node { id name }
                }
            }
        }
    }
}
"#;

const BASIC_QUERY: &str = r#"
query ($page: Int, $perPage: Int) {
    Page(page: $page, perPage: $perPage) {
        media(type: ANIME, sort: ID) {
            id
            idMal
            title { romaji english native }
            type
            format
            status
            description(asHtml: false)
            startDate { year month day }
            endDate { year month day }
            season
            seasonYear
            episodes
            duration
            countryOfOrigin
            source
            coverImage { large medium color }
            bannerImage
            genres
            averageScore
            meanScore
            isAdult
            synonyms
        }
    }
}
"#;
