//! Embedded name/word pools for synthetic data.

use crate::config::Locale;

pub(crate) struct LocalePool {
    pub company_base: &'static [&'static str],
    pub company_suffix: &'static [&'static str],
    pub first_names: &'static [&'static str],
    pub last_names: &'static [&'static str],
    pub streets: &'static [&'static str],
    pub cities: &'static [&'static str],
    pub country: &'static str,
}

pub(crate) fn pool(locale: Locale) -> &'static LocalePool {
    match locale {
        Locale::En => &EN,
        Locale::De => &DE,
    }
}

static EN: LocalePool = LocalePool {
    company_base: &[
        "Acme", "Northwind", "Globex", "Initech", "Vandelay", "Sterling", "Pinnacle", "Summit",
        "Cascade", "Meridian", "Beacon", "Harbor", "Keystone", "Lakeside", "Redwood", "Ironclad",
    ],
    company_suffix: &[
        "Ltd", "Inc", "LLC", "Group", "Holdings", "Partners", "Industries", "Logistics",
    ],
    first_names: &[
        "James", "Mary", "Robert", "Patricia", "John", "Jennifer", "Michael", "Linda", "David",
        "Elizabeth", "William", "Barbara", "Richard", "Susan", "Joseph", "Jessica",
    ],
    last_names: &[
        "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis",
        "Rodriguez", "Martinez", "Wilson", "Anderson", "Taylor", "Thomas", "Moore", "Clark",
    ],
    streets: &[
        "Main Street", "Oak Avenue", "Maple Drive", "Cedar Lane", "Park Road", "Elm Street",
        "Washington Boulevard", "Lake View", "Hillcrest Avenue", "River Road",
    ],
    cities: &[
        "Springfield", "Riverton", "Fairview", "Georgetown", "Clinton", "Salem", "Madison",
        "Franklin", "Arlington", "Ashland",
    ],
    country: "United States",
};

static DE: LocalePool = LocalePool {
    company_base: &[
        "Müller", "Schmidt", "Weber", "Becker", "Hoffmann", "Wagner", "Bauer", "Richter",
        "Neumann", "Krüger", "Lorenz", "Brandt", "Vogel", "Frank", "Berger", "Winkler",
    ],
    company_suffix: &[
        "GmbH", "AG", "KG", "GmbH & Co. KG", "e.K.", "OHG", "SE", "UG",
    ],
    first_names: &[
        "Lukas", "Anna", "Leon", "Lena", "Paul", "Marie", "Jonas", "Laura", "Felix", "Julia",
        "Maximilian", "Sophie", "Moritz", "Hannah", "Tim", "Clara",
    ],
    last_names: &[
        "Müller", "Schmidt", "Schneider", "Fischer", "Weber", "Meyer", "Wagner", "Becker",
        "Schulz", "Hoffmann", "Schäfer", "Koch", "Bauer", "Richter", "Klein", "Wolf",
    ],
    streets: &[
        "Hauptstraße", "Bahnhofstraße", "Gartenstraße", "Schulstraße", "Dorfstraße",
        "Bergstraße", "Lindenallee", "Ringstraße", "Amselweg", "Kirchplatz",
    ],
    cities: &[
        "Berlin", "Hamburg", "München", "Köln", "Frankfurt", "Stuttgart", "Düsseldorf",
        "Leipzig", "Dresden", "Nürnberg",
    ],
    country: "Germany",
};

pub(crate) static PRODUCT_ADJECTIVES: &[&str] = &[
    "Rustic", "Sleek", "Ergonomic", "Durable", "Compact", "Premium", "Refined", "Modular",
    "Lightweight", "Heavy-Duty", "Recycled", "Handcrafted",
];

pub(crate) static PRODUCT_NOUNS: &[&str] = &[
    "Steel Chair", "Wooden Table", "Cotton Shirt", "Granite Panel", "Copper Fitting",
    "Rubber Gasket", "Plastic Crate", "Aluminum Frame", "Glass Shelf", "Leather Case",
    "Ceramic Mug", "Carbon Bracket",
];

pub(crate) static EMAIL_DOMAINS: &[&str] = &[
    "example.com", "mail.test", "corp.example", "invoice.example", "office.test",
];

pub(crate) static LOREM_WORDS: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    "eiusmod", "tempor", "incididunt", "labore", "dolore", "magna", "aliqua",
];
