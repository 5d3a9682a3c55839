//! Slide content: course cards grouped by category, plus testimonials.

/// One course card in the carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Course {
    pub title: &'static str,
    pub instructor: &'static str,
    pub lessons: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub key: &'static str,
    pub label: &'static str,
    pub courses: &'static [Course],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Testimonial {
    pub quote: &'static str,
    pub name: &'static str,
    pub title: &'static str,
}

const fn course(title: &'static str, instructor: &'static str, lessons: u16) -> Course {
    Course {
        title,
        instructor,
        lessons,
    }
}

/// Shown first, and used whenever a requested category doesn't exist.
pub const DEFAULT_CATEGORY: &str = "trending";

pub static CATEGORIES: &[Category] = &[
    Category {
        key: "trending",
        label: "Trending",
        courses: &[
            course("Books That Change Your Year", "A. Mori", 12),
            course("Eight Habits That Grow Savings", "K. Sato", 9),
            course("Seven Career Triggers", "R. Ito", 14),
            course("Deep Work in Practice", "L. Brandt", 10),
            course("The Art of the Weekly Review", "J. Okafor", 6),
            course("Negotiation Basics", "M. Ruiz", 11),
            course("Sleep, Focus, Repeat", "D. Chen", 8),
            course("Writing Clear Emails", "P. Novak", 7),
            course("Personal Finance 101", "S. Haddad", 15),
            course("Learning How to Learn", "E. Lindqvist", 13),
            course("Public Speaking Without Fear", "T. Mensah", 9),
            course("Mindful Productivity", "Y. Tanaka", 10),
        ],
    },
    Category {
        key: "storymaster",
        label: "Storymaster",
        courses: &[
            course("Acting Fundamentals", "C. Duval", 16),
            course("Voice Training Basics", "H. Park", 12),
            course("Stage Performance Tips", "I. Rossi", 9),
            course("Screenwriting Structure", "B. Adeyemi", 14),
            course("Improvisation Workshop", "N. Kowalski", 8),
            course("Character Development", "F. Moreau", 11),
            course("Directing Short Films", "G. Alvarez", 13),
        ],
    },
    Category {
        key: "business",
        label: "Business",
        courses: &[
            course("Startup Essentials", "V. Iyer", 18),
            course("Leadership Skills", "O. Bakker", 12),
            course("Marketing Strategy", "W. Zhang", 15),
            course("Pricing Your Product", "Q. Silva", 7),
            course("Hiring Your First Ten", "U. Nakamura", 9),
            course("Reading a Balance Sheet", "X. Fischer", 10),
            course("Sales Conversations", "Z. Hassan", 8),
            course("Building a Brand", "A. Kim", 11),
            course("Operations at Scale", "R. Petrov", 14),
        ],
    },
    Category {
        key: "english",
        label: "English",
        courses: &[
            course("Everyday Conversation", "L. Walker", 20),
            course("Business English", "M. Evans", 16),
            course("Pronunciation Lab", "S. Turner", 12),
            course("Grammar in Context", "K. Hughes", 18),
        ],
    },
    Category {
        key: "japanese",
        label: "Japanese",
        courses: &[
            course("Hiragana in a Week", "M. Suzuki", 7),
            course("Katakana Essentials", "T. Watanabe", 7),
            course("Polite Speech", "H. Yamamoto", 12),
            course("Kanji Foundations", "A. Kobayashi", 24),
            course("Travel Phrases", "R. Nakamura", 9),
            course("Reading Manga", "S. Yoshida", 10),
        ],
    },
    Category {
        key: "biography",
        label: "Biography",
        courses: &[
            course("Lives of the Inventors", "E. Moreno", 10),
            course("Explorers and Their Maps", "I. Novak", 8),
        ],
    },
];

pub static TESTIMONIALS: &[Testimonial] = &[
    Testimonial {
        quote: "I've watched dozens of classes while cooking, commuting and doing chores. \
                They taught me to learn with passion, grit and humility.",
        name: "Clarissa",
        title: "Founder & Teacher, USA",
    },
    Testimonial {
        quote: "The quality of instruction and production is unmatched. Each class feels \
                like a documentary and a degree rolled into one.",
        name: "Michael",
        title: "Software Engineer, Canada",
    },
    Testimonial {
        quote: "The platform has transformed how I approach learning. The insights from \
                industry leaders are invaluable.",
        name: "Sarah",
        title: "Creative Director, UK",
    },
];

/// Look up a category by key, falling back to [`DEFAULT_CATEGORY`].
pub fn category(key: &str) -> &'static Category {
    CATEGORIES
        .iter()
        .find(|c| c.key == key)
        .unwrap_or_else(|| {
            tracing::debug!("unknown category `{key}`, showing {DEFAULT_CATEGORY}");
            &CATEGORIES[0]
        })
}

/// The category after `key`, wrapping.
pub fn next_category(key: &str) -> &'static Category {
    let idx = CATEGORIES.iter().position(|c| c.key == key).unwrap_or(0);
    &CATEGORIES[(idx + 1) % CATEGORIES.len()]
}
