//! Page registry.
//!
//! Each editable page contributes data only: the namespaces it owns and the
//! fields (id, admin label, compiled-in default) inside them. Behaviour lives
//! in `overrides` and `binding`.

use crate::binding::EditableField;
use crate::overrides::OverrideStore;
use serde::Serialize;

// ============================================================================
// Descriptors
// ============================================================================

/// How a field is rendered on its page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Element {
    Heading,
    Subheading,
    Lead,
    Paragraph,
    Question,
    Answer,
    Button { href: &'static str },
    Image,
    /// The value is the link target; the label is fixed.
    DownloadLink { label: &'static str },
}

impl Element {
    /// Fields whose value is a URL or data URI rather than copy.
    pub fn is_asset(&self) -> bool {
        matches!(self, Element::Image | Element::DownloadLink { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    pub id: &'static str,
    pub label: &'static str,
    pub default_value: &'static str,
    pub element: Element,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct FieldGroup {
    pub namespace: &'static str,
    pub fields: &'static [FieldDescriptor],
}

const fn text(id: &'static str, label: &'static str, default_value: &'static str, element: Element) -> FieldDescriptor {
    FieldDescriptor {
        id,
        label,
        default_value,
        element,
    }
}

const fn image(id: &'static str, label: &'static str, default_value: &'static str) -> FieldDescriptor {
    FieldDescriptor {
        id,
        label,
        default_value,
        element: Element::Image,
    }
}

// ============================================================================
// Pages
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageId {
    About,
    Faq,
    GettingStarted,
    Sponsors,
    Queensland,
    Victoria,
}

impl PageId {
    pub const ALL: [PageId; 6] = [
        PageId::About,
        PageId::Faq,
        PageId::GettingStarted,
        PageId::Sponsors,
        PageId::Queensland,
        PageId::Victoria,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            PageId::About => "about",
            PageId::Faq => "faq",
            PageId::GettingStarted => "getting-started",
            PageId::Sponsors => "sponsors",
            PageId::Queensland => "queensland",
            PageId::Victoria => "victoria",
        }
    }

    pub fn from_slug(slug: &str) -> Option<PageId> {
        PageId::ALL.into_iter().find(|p| p.slug() == slug)
    }

    pub fn path(&self) -> &'static str {
        match self {
            PageId::About => "/about",
            PageId::Faq => "/faq",
            PageId::GettingStarted => "/getting-started",
            PageId::Sponsors => "/sponsors",
            PageId::Queensland => "/satellites/queensland",
            PageId::Victoria => "/satellites/victoria",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            PageId::About => "About",
            PageId::Faq => "FAQ",
            PageId::GettingStarted => "Getting Started",
            PageId::Sponsors => "Sponsors",
            PageId::Queensland => "Queensland Chapter",
            PageId::Victoria => "Victoria Chapter",
        }
    }

    /// Letter for the Ctrl/Cmd+Shift shortcut. Distinct per page so panels
    /// mounted together never fight over a key.
    pub fn hotkey(&self) -> char {
        match self {
            PageId::About => 'A',
            PageId::Faq => 'F',
            PageId::GettingStarted => 'G',
            PageId::Sponsors => 'S',
            PageId::Queensland => 'Q',
            PageId::Victoria => 'V',
        }
    }

    pub fn groups(&self) -> &'static [FieldGroup] {
        match self {
            PageId::About => ABOUT,
            PageId::Faq => FAQ,
            PageId::GettingStarted => GETTING_STARTED,
            PageId::Sponsors => SPONSORS,
            PageId::Queensland => QUEENSLAND,
            PageId::Victoria => VICTORIA,
        }
    }
}

/// Every field a page's admin panel lists, in display order.
pub fn list_fields(page: PageId) -> Vec<EditableField> {
    page.groups()
        .iter()
        .flat_map(|g| g.fields.iter().map(move |f| EditableField::new(g.namespace, f)))
        .collect()
}

/// Look up a declared field. Only declared fields may be written.
pub fn find_field(namespace: &str, field: &str) -> Option<EditableField> {
    PageId::ALL
        .iter()
        .flat_map(|p| p.groups().iter())
        .filter(|g| g.namespace == namespace)
        .flat_map(|g| g.fields.iter().map(move |f| EditableField::new(g.namespace, f)))
        .find(|b| b.field.id == field)
}

pub fn page_for_namespace(namespace: &str) -> Option<PageId> {
    PageId::ALL
        .into_iter()
        .find(|p| p.groups().iter().any(|g| g.namespace == namespace))
}

/// Clear every namespace the page owns, singleton slots included.
pub fn reset_all_for_page(store: &OverrideStore, page: PageId) {
    for group in page.groups() {
        store.clear(group.namespace);
    }
    tracing::info!(page = page.slug(), "page overrides reset");
}

// ============================================================================
// About
// ============================================================================

static ABOUT: &[FieldGroup] = &[
    FieldGroup {
        namespace: "page.about.text",
        fields: &[
            text("hero.title", "Hero title", "About the Program", Element::Heading),
            text(
                "hero.subtitle",
                "Hero subtitle",
                "A student-run outreach program bringing hands-on science and engineering workshops into high schools.",
                Element::Lead,
            ),
            text("mission.heading", "Mission heading", "Our Mission", Element::Subheading),
            text(
                "mission.body",
                "Mission text",
                "We pair university volunteers with secondary students so that every student can see themselves in a technical career.",
                Element::Paragraph,
            ),
            text("story.heading", "Story heading", "How It Started", Element::Subheading),
            text(
                "story.body",
                "Story text",
                "What began as a single lunchtime club has grown into chapters across several states, run entirely by student volunteers.",
                Element::Paragraph,
            ),
            text(
                "cta.button",
                "Call to action",
                "Get Involved",
                Element::Button {
                    href: "/getting-started",
                },
            ),
        ],
    },
    FieldGroup {
        namespace: "page.about.images",
        fields: &[
            image("slot-0", "Gallery image 1", "/assets/about/gallery-1.jpg"),
            image("slot-1", "Gallery image 2", "/assets/about/gallery-2.jpg"),
            image("slot-2", "Gallery image 3", "/assets/about/gallery-3.jpg"),
        ],
    },
];

// ============================================================================
// FAQ
// ============================================================================

static FAQ: &[FieldGroup] = &[FieldGroup {
    namespace: "page.faq.text",
    fields: &[
        text("title", "Page title", "Frequently Asked Questions", Element::Heading),
        text(
            "intro",
            "Introduction",
            "Answers to the questions we hear most from students, parents and schools.",
            Element::Lead,
        ),
        text("q1.question", "Question 1", "Who can take part?", Element::Question),
        text(
            "q1.answer",
            "Answer 1",
            "Any high school student. No prior experience is needed.",
            Element::Answer,
        ),
        text("q2.question", "Question 2", "Does it cost anything?", Element::Question),
        text(
            "q2.answer",
            "Answer 2",
            "No. Workshops are free thanks to our sponsors.",
            Element::Answer,
        ),
        text("q3.question", "Question 3", "How do I volunteer?", Element::Question),
        text(
            "q3.answer",
            "Answer 3",
            "University students can sign up through the Getting Started page.",
            Element::Answer,
        ),
        text("q4.question", "Question 4", "Can my school host a workshop?", Element::Question),
        text(
            "q4.answer",
            "Answer 4",
            "Yes. Contact us and the nearest chapter will arrange a visit.",
            Element::Answer,
        ),
    ],
}];

// ============================================================================
// Getting Started
// ============================================================================

static GETTING_STARTED: &[FieldGroup] = &[
    FieldGroup {
        namespace: "page.enter.text",
        fields: &[
            text("title", "Page title", "Getting Started", Element::Heading),
            text(
                "intro",
                "Introduction",
                "Four steps from first hello to running your own workshop.",
                Element::Lead,
            ),
            text("step1.heading", "Step 1 heading", "1. Find your chapter", Element::Subheading),
            text(
                "step1.body",
                "Step 1 text",
                "See the satellite chapters to find the team nearest you.",
                Element::Paragraph,
            ),
            text("step2.heading", "Step 2 heading", "2. Come to an information session", Element::Subheading),
            text(
                "step2.body",
                "Step 2 text",
                "Sessions run at the start of every semester.",
                Element::Paragraph,
            ),
            text("step3.heading", "Step 3 heading", "3. Complete volunteer training", Element::Subheading),
            text(
                "step3.body",
                "Step 3 text",
                "A short course covering workshop delivery and working with young people.",
                Element::Paragraph,
            ),
            text("step4.heading", "Step 4 heading", "4. Join a workshop", Element::Subheading),
            text(
                "step4.body",
                "Step 4 text",
                "Start as an assistant, then lead your own sessions.",
                Element::Paragraph,
            ),
            text(
                "cta.button",
                "Call to action",
                "Questions? Contact us",
                Element::Button { href: "/contact" },
            ),
        ],
    },
    FieldGroup {
        namespace: "page.enter.images",
        fields: &[
            image("hero", "Hero image", "/assets/getting-started/hero.jpg"),
            image("who", "Who can join image", "/assets/getting-started/who.jpg"),
        ],
    },
];

// ============================================================================
// Sponsors
// ============================================================================

static SPONSORS: &[FieldGroup] = &[
    FieldGroup {
        namespace: "page.sponsor.text",
        fields: &[
            text("title", "Page title", "Our Sponsors", Element::Heading),
            text(
                "intro",
                "Introduction",
                "Our partners make every workshop possible.",
                Element::Lead,
            ),
            text("tiers.heading", "Tiers heading", "Partnership Tiers", Element::Subheading),
            text(
                "tiers.body",
                "Tiers text",
                "Sponsorship can fund equipment, travel for regional visits, or an entire chapter for a year.",
                Element::Paragraph,
            ),
            text(
                "contact.button",
                "Contact button",
                "Become a Sponsor",
                Element::Button { href: "/contact" },
            ),
        ],
    },
    FieldGroup {
        namespace: "page.sponsor.images",
        fields: &[
            image("slot-0", "Sponsor logo 1", "/assets/sponsors/logo-1.png"),
            image("slot-1", "Sponsor logo 2", "/assets/sponsors/logo-2.png"),
            image("slot-2", "Sponsor logo 3", "/assets/sponsors/logo-3.png"),
        ],
    },
    FieldGroup {
        namespace: "page.sponsor.brochure",
        fields: &[FieldDescriptor {
            id: "url",
            label: "Brochure link",
            default_value: "/assets/sponsors/brochure.pdf",
            element: Element::DownloadLink {
                label: "Download the sponsorship brochure",
            },
        }],
    },
    FieldGroup {
        namespace: "page.sponsor.poster",
        fields: &[image("url", "Sponsor poster", "/assets/sponsors/poster.jpg")],
    },
];

// ============================================================================
// Satellite Chapters
// ============================================================================

static QUEENSLAND: &[FieldGroup] = &[
    FieldGroup {
        namespace: "satellite.queensland.text",
        fields: &[
            text("title", "Chapter title", "Queensland Chapter", Element::Heading),
            text(
                "intro",
                "Introduction",
                "Our Brisbane team runs workshops across South East Queensland.",
                Element::Lead,
            ),
            text("lead.heading", "Leadership heading", "Chapter Leads", Element::Subheading),
            text(
                "lead.body",
                "Leadership text",
                "The chapter is coordinated by a committee of undergraduate volunteers.",
                Element::Paragraph,
            ),
            text(
                "meeting.details",
                "Meeting details",
                "We meet every second Wednesday during semester.",
                Element::Paragraph,
            ),
        ],
    },
    FieldGroup {
        namespace: "satellite.queensland.images",
        fields: &[
            image("slot-0", "Photo 1", "/assets/satellites/queensland-1.jpg"),
            image("slot-1", "Photo 2", "/assets/satellites/queensland-2.jpg"),
            image("slot-2", "Photo 3", "/assets/satellites/queensland-3.jpg"),
        ],
    },
];

static VICTORIA: &[FieldGroup] = &[
    FieldGroup {
        namespace: "satellite.victoria.text",
        fields: &[
            text("title", "Chapter title", "Victoria Chapter", Element::Heading),
            text(
                "intro",
                "Introduction",
                "Our Melbourne team visits schools across metropolitan and regional Victoria.",
                Element::Lead,
            ),
            text("lead.heading", "Leadership heading", "Chapter Leads", Element::Subheading),
            text(
                "lead.body",
                "Leadership text",
                "The chapter is coordinated by a committee of undergraduate volunteers.",
                Element::Paragraph,
            ),
            text(
                "meeting.details",
                "Meeting details",
                "We meet on the first Monday of each month.",
                Element::Paragraph,
            ),
        ],
    },
    FieldGroup {
        namespace: "satellite.victoria.images",
        fields: &[
            image("slot-0", "Photo 1", "/assets/satellites/victoria-1.jpg"),
            image("slot-1", "Photo 2", "/assets/satellites/victoria-2.jpg"),
            image("slot-2", "Photo 3", "/assets/satellites/victoria-3.jpg"),
        ],
    },
];
