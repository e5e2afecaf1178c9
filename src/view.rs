//! The page view-model.
//!
//! [`build_page_view`] is a pure function from (content document,
//! presentation state) to [`PageView`]: every string the page shows, already
//! resolved for the active language. Nothing here touches a surface; the
//! controller and the static renderer both consume the same view, so the
//! language-switch behaviour can be tested without any markup at all.
//!
//! ## Fixed slots
//!
//! Besides the rendered lists, the page has a fixed set of labelled elements
//! ([`Slot`]). Each slot knows its element id, how its value is written
//! ([`SlotKind`]), and where the value comes from in the document.

use crate::content::{ContentDocument, Gap, Seg, format_path, or_missing};
use crate::state::PresentationState;
use crate::types::{Lang, MISSING, Theme};

/// How a slot value is written into its element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    /// Plain text content.
    Text,
    /// Trusted markup from the content document (inline emphasis, line breaks).
    Html,
    /// Input placeholder attribute.
    Placeholder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlotSource {
    I18n(&'static [Seg<'static>]),
    ContactEmail,
    ContactGithub,
    ContactLinkedin,
    FooterCopy,
}

/// A fixed labelled element on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Slot {
    HeroTitle,
    HeroDesc,
    HeroStatus,
    BtnWork,
    BtnContact,
    NavSkills,
    NavWork,
    NavExperience,
    NavContact,
    SecSkills,
    SecWork,
    SecExp,
    SecContact,
    ContactHeading,
    FormNameLabel,
    FormEmailLabel,
    FormMsgLabel,
    FormName,
    FormEmail,
    FormMsg,
    ContactEmail,
    ContactGithub,
    ContactLinkedin,
    FooterCopy,
    FooterGithub,
    FooterLinkedin,
    FooterResume,
    SubmitBtn,
}

impl Slot {
    pub const ALL: [Slot; 28] = [
        Slot::HeroTitle,
        Slot::HeroDesc,
        Slot::HeroStatus,
        Slot::BtnWork,
        Slot::BtnContact,
        Slot::NavSkills,
        Slot::NavWork,
        Slot::NavExperience,
        Slot::NavContact,
        Slot::SecSkills,
        Slot::SecWork,
        Slot::SecExp,
        Slot::SecContact,
        Slot::ContactHeading,
        Slot::FormNameLabel,
        Slot::FormEmailLabel,
        Slot::FormMsgLabel,
        Slot::FormName,
        Slot::FormEmail,
        Slot::FormMsg,
        Slot::ContactEmail,
        Slot::ContactGithub,
        Slot::ContactLinkedin,
        Slot::FooterCopy,
        Slot::FooterGithub,
        Slot::FooterLinkedin,
        Slot::FooterResume,
        Slot::SubmitBtn,
    ];

    /// Element id of the slot in the host markup.
    pub fn id(self) -> &'static str {
        match self {
            Slot::HeroTitle => "heroTitle",
            Slot::HeroDesc => "heroDesc",
            Slot::HeroStatus => "heroStatus",
            Slot::BtnWork => "btnWork",
            Slot::BtnContact => "btnContact",
            Slot::NavSkills => "navSkills",
            Slot::NavWork => "navWork",
            Slot::NavExperience => "navExperience",
            Slot::NavContact => "navContact",
            Slot::SecSkills => "secSkills",
            Slot::SecWork => "secWork",
            Slot::SecExp => "secExp",
            Slot::SecContact => "secContact",
            Slot::ContactHeading => "contactHeading",
            Slot::FormNameLabel => "fNameLabel",
            Slot::FormEmailLabel => "fEmailLabel",
            Slot::FormMsgLabel => "fMsgLabel",
            Slot::FormName => "fName",
            Slot::FormEmail => "fEmail",
            Slot::FormMsg => "fMsg",
            Slot::ContactEmail => "contactEmail",
            Slot::ContactGithub => "contactGithub",
            Slot::ContactLinkedin => "contactLinkedin",
            Slot::FooterCopy => "footerCopy",
            Slot::FooterGithub => "footerGithub",
            Slot::FooterLinkedin => "footerLinkedin",
            Slot::FooterResume => "footerResume",
            Slot::SubmitBtn => "submitBtn",
        }
    }

    pub fn kind(self) -> SlotKind {
        match self {
            Slot::HeroTitle | Slot::ContactHeading => SlotKind::Html,
            Slot::FormName | Slot::FormEmail | Slot::FormMsg => SlotKind::Placeholder,
            _ => SlotKind::Text,
        }
    }

    fn source(self) -> SlotSource {
        use Seg::{Key, Lang as L};
        use SlotSource::I18n;
        match self {
            Slot::HeroTitle => I18n(&[Key("hero"), L, Key("title")]),
            Slot::HeroDesc => I18n(&[Key("hero"), L, Key("desc")]),
            Slot::HeroStatus => I18n(&[Key("status"), L]),
            Slot::BtnWork => I18n(&[Key("btnWork"), L]),
            Slot::BtnContact => I18n(&[Key("btnContact"), L]),
            Slot::NavSkills => I18n(&[Key("nav"), Key("skills"), L]),
            Slot::NavWork => I18n(&[Key("nav"), Key("work"), L]),
            Slot::NavExperience => I18n(&[Key("nav"), Key("experience"), L]),
            Slot::NavContact => I18n(&[Key("nav"), Key("contact"), L]),
            Slot::SecSkills => I18n(&[Key("secSkills"), L]),
            Slot::SecWork => I18n(&[Key("secWork"), L]),
            Slot::SecExp => I18n(&[Key("secExp"), L]),
            Slot::SecContact => I18n(&[Key("secContact"), L]),
            Slot::ContactHeading => I18n(&[Key("contactHeading"), L]),
            Slot::FormNameLabel => I18n(&[Key("form"), L, Key("nameLabel")]),
            Slot::FormEmailLabel => I18n(&[Key("form"), L, Key("emailLabel")]),
            Slot::FormMsgLabel => I18n(&[Key("form"), L, Key("msgLabel")]),
            Slot::FormName => I18n(&[Key("form"), L, Key("name")]),
            Slot::FormEmail => I18n(&[Key("form"), L, Key("email")]),
            Slot::FormMsg => I18n(&[Key("form"), L, Key("msg")]),
            Slot::ContactEmail => SlotSource::ContactEmail,
            Slot::ContactGithub => SlotSource::ContactGithub,
            Slot::ContactLinkedin => SlotSource::ContactLinkedin,
            Slot::FooterCopy => SlotSource::FooterCopy,
            Slot::FooterGithub => I18n(&[Key("footer"), Key("github"), L]),
            Slot::FooterLinkedin => I18n(&[Key("footer"), Key("linkedin"), L]),
            Slot::FooterResume => I18n(&[Key("footer"), Key("resume"), L]),
            Slot::SubmitBtn => I18n(&[Key("btnSend"), L]),
        }
    }

    /// Resolve the slot's value, `None` when the document lacks it.
    pub fn lookup(self, doc: &ContentDocument, lang: Lang) -> Option<String> {
        match self.source() {
            SlotSource::I18n(path) => doc.i18n(path, lang),
            SlotSource::ContactEmail => doc.contact.email.clone(),
            SlotSource::ContactGithub => doc.contact.github.clone(),
            SlotSource::ContactLinkedin => doc.contact.linkedin.clone(),
            SlotSource::FooterCopy => doc.footer.copy.clone(),
        }
    }

    /// Whether the value differs per language.
    pub fn is_localized(self) -> bool {
        matches!(self.source(), SlotSource::I18n(_))
    }

    /// Where the value lives in the document, for diagnostics.
    pub fn location(self, lang: Lang) -> String {
        match self.source() {
            SlotSource::I18n(path) => format!("i18n.{}", format_path(path, lang)),
            SlotSource::ContactEmail => "contact.email".to_string(),
            SlotSource::ContactGithub => "contact.github".to_string(),
            SlotSource::ContactLinkedin => "contact.linkedin".to_string(),
            SlotSource::FooterCopy => "footer.copy".to_string(),
        }
    }
}

/// Submit button label shown while the form stub is "sending".
pub fn sent_label(doc: &ContentDocument, lang: Lang) -> String {
    doc.i18n_text(&[Seg::Key("btnSent"), Seg::Lang], lang)
}

/// Submit button label at rest.
pub fn send_label(doc: &ContentDocument, lang: Lang) -> String {
    doc.i18n_text(&[Seg::Key("btnSend"), Seg::Lang], lang)
}

/// Whether a skill icon is drawn inverted in the light theme.
pub fn inverts_on_light(icon: &str, patterns: &[String]) -> bool {
    patterns.iter().any(|p| !p.is_empty() && icon.contains(p.as_str()))
}

#[derive(Debug, Clone, PartialEq)]
pub struct SlotView {
    pub slot: Slot,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkillGroupView {
    pub key: String,
    pub title: String,
    pub skills: Vec<SkillView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkillView {
    pub icon: String,
    pub label: String,
    pub invert_on_light: bool,
    pub pct: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectView {
    pub name: String,
    pub github: String,
    pub live: String,
    pub github_label: String,
    pub live_label: String,
    pub tags: Vec<String>,
    pub desc: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExperienceView {
    pub date: String,
    pub role: String,
    pub company: String,
    pub desc: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatView {
    pub key: String,
    pub label: String,
    pub target: u64,
}

/// Everything the page shows for one presentation state.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub lang: Lang,
    pub theme: Theme,
    pub root_classes: Vec<String>,
    pub slots: Vec<SlotView>,
    pub skill_groups: Vec<SkillGroupView>,
    pub projects: Vec<ProjectView>,
    pub experience: Vec<ExperienceView>,
    pub stats: Vec<StatView>,
}

impl PageView {
    /// Value of a fixed slot.
    pub fn slot(&self, slot: Slot) -> &str {
        self.slots
            .iter()
            .find(|s| s.slot == slot)
            .map(|s| s.value.as_str())
            .unwrap_or(MISSING)
    }

    /// Label of a stat, [`MISSING`] for keys the document does not define.
    pub fn stat_label(&self, key: &str) -> &str {
        self.stats
            .iter()
            .find(|s| s.key == key)
            .map(|s| s.label.as_str())
            .unwrap_or(MISSING)
    }

    /// Every language-dependent string in the view.
    ///
    /// Plain values shared by all languages (links, contact strings, tags)
    /// are left out.
    pub fn localized_strings(&self) -> Vec<&str> {
        let mut out: Vec<&str> = self
            .slots
            .iter()
            .filter(|s| s.slot.is_localized())
            .map(|s| s.value.as_str())
            .collect();
        for group in &self.skill_groups {
            out.push(group.title.as_str());
            out.extend(group.skills.iter().map(|s| s.label.as_str()));
        }
        for p in &self.projects {
            out.extend([
                p.name.as_str(),
                p.desc.as_str(),
                p.github_label.as_str(),
                p.live_label.as_str(),
            ]);
        }
        for e in &self.experience {
            out.extend([
                e.date.as_str(),
                e.role.as_str(),
                e.company.as_str(),
                e.desc.as_str(),
            ]);
        }
        out.extend(self.stats.iter().map(|s| s.label.as_str()));
        out
    }
}

/// Build the view for a presentation state.
///
/// Lists keep document order. `invert_on_light` is the icon substring list
/// from the skills config.
pub fn build_page_view(
    doc: &ContentDocument,
    state: &PresentationState,
    invert_on_light: &[String],
) -> PageView {
    let lang = state.language;

    let slots = Slot::ALL
        .iter()
        .map(|&slot| SlotView {
            slot,
            value: slot
                .lookup(doc, lang)
                .unwrap_or_else(|| MISSING.to_string()),
        })
        .collect();

    let skill_groups = doc
        .skill_groups
        .iter()
        .map(|group| SkillGroupView {
            key: group.key.clone(),
            title: doc.skill_group_title(&group.key, lang),
            skills: group
                .skills
                .iter()
                .map(|skill| SkillView {
                    icon: skill.icon.clone(),
                    label: skill.label.text(lang).to_string(),
                    invert_on_light: inverts_on_light(&skill.icon, invert_on_light),
                    pct: skill.pct.map(|p| p.min(100)),
                })
                .collect(),
        })
        .collect();

    let github_label = doc.i18n_text(&[Seg::Key("githubLbl"), Seg::Lang], lang);
    let live_label = doc.i18n_text(&[Seg::Key("liveLbl"), Seg::Lang], lang);
    let projects = doc
        .projects_for(lang)
        .iter()
        .map(|p| ProjectView {
            name: or_missing(&p.name).to_string(),
            github: or_missing(&p.github).to_string(),
            live: or_missing(&p.live).to_string(),
            github_label: github_label.clone(),
            live_label: live_label.clone(),
            tags: p.tags.clone(),
            desc: or_missing(&p.desc).to_string(),
        })
        .collect();

    let experience = doc
        .experience_for(lang)
        .iter()
        .map(|e| ExperienceView {
            date: or_missing(&e.date).to_string(),
            role: or_missing(&e.role).to_string(),
            company: or_missing(&e.company).to_string(),
            desc: or_missing(&e.desc).to_string(),
        })
        .collect();

    let stats = doc
        .stats
        .iter()
        .map(|(key, stat)| StatView {
            key: key.clone(),
            label: doc.stat_label(key, lang),
            target: stat.value,
        })
        .collect();

    PageView {
        lang,
        theme: state.theme,
        root_classes: state.root_classes(),
        slots,
        skill_groups,
        projects,
        experience,
        stats,
    }
}

/// Fixed slots the document cannot fill, for every language.
///
/// Plain fields are language independent and reported once.
pub fn slot_gaps(doc: &ContentDocument) -> Vec<Gap> {
    let mut gaps = Vec::new();
    for lang in Lang::ALL {
        for slot in Slot::ALL {
            if !slot.is_localized() && lang != Lang::ALL[0] {
                continue;
            }
            if slot.lookup(doc, lang).is_none() {
                gaps.push(Gap {
                    lang,
                    location: slot.location(lang),
                });
            }
        }
        for path in [
            [Seg::Key("githubLbl"), Seg::Lang],
            [Seg::Key("liveLbl"), Seg::Lang],
            [Seg::Key("btnSent"), Seg::Lang],
        ] {
            if doc.i18n(&path, lang).is_none() {
                gaps.push(Gap {
                    lang,
                    location: format!("i18n.{}", format_path(&path, lang)),
                });
            }
        }
    }
    gaps
}

/// Every gap in a document: structured content first, then fixed slots.
pub fn localization_gaps(doc: &ContentDocument) -> Vec<Gap> {
    let mut gaps = doc.gaps();
    gaps.extend(slot_gaps(doc));
    gaps
}
