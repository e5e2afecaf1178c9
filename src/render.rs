//! HTML rendering of the page view.
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! All interpolation is escaped except the two [`SlotKind::Html`] slots,
//! whose markup comes from the content document.
//!
//! ## Fragments and documents
//!
//! The list renderers ([`render_skills`], [`render_projects`],
//! [`render_experience`]) return one [`Row`] per reveal row. The controller
//! mounts those rows into a live [`Surface`](crate::surface::Surface); the
//! static build embeds the same rows in a full document via
//! [`render_document`].
//!
//! Row ids are positional (`project-0`, `skill-group-1`, ...) so a language
//! switch replaces each row in place.

use crate::reveal::VISIBLE_CLASS;
use crate::surface::Mount;
use crate::types::Lang;
use crate::view::{ExperienceView, PageView, ProjectView, SkillGroupView, Slot, SlotKind};
use maud::{DOCTYPE, Markup, PreEscaped, html};

/// Whether rows start hidden and wait for a scroll reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealMode {
    /// Live session: skill rows wait for the reveal controller.
    Deferred,
    /// Static page: everything is rendered in its revealed state.
    Immediate,
}

/// A fill bar inside a skill row.
#[derive(Debug, Clone, PartialEq)]
pub struct Fill {
    pub id: String,
    pub pct: u32,
}

/// One rendered reveal row.
#[derive(Debug, Clone)]
pub struct Row {
    pub id: String,
    pub markup: Markup,
    /// Rendered with the `vis` marker already set.
    pub visible: bool,
    pub fills: Vec<Fill>,
}

/// Element id of the counter for a stat.
pub fn counter_id(key: &str) -> String {
    format!("stat-{key}-count")
}

/// Element id of the label for a stat.
pub fn stat_label_id(key: &str) -> String {
    format!("stat-{key}-label")
}

fn slot_markup(view: &PageView, slot: Slot) -> Markup {
    let value = view.slot(slot);
    match slot.kind() {
        SlotKind::Html => html! { (PreEscaped(value)) },
        SlotKind::Text | SlotKind::Placeholder => html! { (value) },
    }
}

/// Skill groups, one row per group.
pub fn render_skills(groups: &[SkillGroupView], mode: RevealMode) -> Vec<Row> {
    groups
        .iter()
        .enumerate()
        .map(|(gi, group)| {
            let id = format!("skill-group-{gi}");
            let revealed = mode == RevealMode::Immediate;
            let fills: Vec<Fill> = group
                .skills
                .iter()
                .enumerate()
                .filter_map(|(si, skill)| {
                    skill.pct.map(|pct| Fill {
                        id: format!("{id}-fill-{si}"),
                        pct,
                    })
                })
                .collect();

            let markup = html! {
                div.anim-row.skill-group.vis[revealed] id=(id) data-group=(group.key) {
                    h3.skill-group-title { (group.title) }
                    ul.skill-list {
                        @for (si, skill) in group.skills.iter().enumerate() {
                            li.skill {
                                img.skill-icon.invert-on-light[skill.invert_on_light]
                                    src=(skill.icon) alt="" loading="lazy";
                                span.skill-label { (skill.label) }
                                @if let Some(pct) = skill.pct {
                                    @let style = revealed.then(|| format!("width: {pct}%"));
                                    div.skill-bar {
                                        div.sk-fill id={ (id) "-fill-" (si) } data-w=(pct) style=[style] {}
                                    }
                                    span.skill-pct { (pct) }
                                }
                            }
                        }
                    }
                }
            };

            Row {
                id,
                markup,
                visible: revealed,
                fills,
            }
        })
        .collect()
}

/// Project rows. Always rendered visible.
pub fn render_projects(projects: &[ProjectView]) -> Vec<Row> {
    projects
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let id = format!("project-{i}");
            let markup = html! {
                div.anim-row.project.(VISIBLE_CLASS) id=(id) {
                    div.project-head {
                        span.project-name { (p.name) }
                        div.project-links {
                            a.project-link href=(p.github) { (p.github_label) }
                            a.project-link href=(p.live) { (p.live_label) }
                        }
                    }
                    div.project-tags {
                        @for tag in &p.tags {
                            span.tag { (tag) }
                        }
                    }
                    p.proj-desc { (p.desc) }
                }
            };
            Row {
                id,
                markup,
                visible: true,
                fills: Vec::new(),
            }
        })
        .collect()
}

/// Experience rows. Always rendered visible.
pub fn render_experience(entries: &[ExperienceView]) -> Vec<Row> {
    entries
        .iter()
        .enumerate()
        .map(|(i, e)| {
            let id = format!("experience-{i}");
            let markup = html! {
                div.anim-row.experience.(VISIBLE_CLASS) id=(id) {
                    span.exp-date { (e.date) }
                    div {
                        div.exp-role { (e.role) }
                        div.exp-company { (e.company) }
                        div.exp-desc { (e.desc) }
                    }
                }
            };
            Row {
                id,
                markup,
                visible: true,
                fills: Vec::new(),
            }
        })
        .collect()
}

fn mount_markup(rows: &[Row]) -> Markup {
    html! {
        @for row in rows {
            (row.markup)
        }
    }
}

/// Header navigation with the language toggle.
///
/// `lang_href` maps a language to the page that shows it; the active
/// language's button carries the `active` class.
fn site_header(view: &PageView, lang_href: &dyn Fn(Lang) -> String) -> Markup {
    html! {
        header.site-header {
            nav.site-nav {
                a id="navSkills" href="#skills" { (slot_markup(view, Slot::NavSkills)) }
                a id="navWork" href="#work" { (slot_markup(view, Slot::NavWork)) }
                a id="navExperience" href="#experience" { (slot_markup(view, Slot::NavExperience)) }
                a id="navContact" href="#contact" { (slot_markup(view, Slot::NavContact)) }
            }
            div.lang-toggle {
                @for lang in Lang::ALL {
                    @let class = if lang == view.lang { "lang-btn active" } else { "lang-btn" };
                    a class=(class) id=(lang.toggle_id()) href=(lang_href(lang)) hreflang=(lang.code()) {
                        (lang.code().to_uppercase())
                    }
                }
            }
        }
    }
}

fn hero(view: &PageView, mode: RevealMode) -> Markup {
    html! {
        section.hero {
            p id="heroStatus" { (slot_markup(view, Slot::HeroStatus)) }
            h1 id="heroTitle" { (slot_markup(view, Slot::HeroTitle)) }
            p id="heroDesc" { (slot_markup(view, Slot::HeroDesc)) }
            div.hero-actions {
                a id="btnWork" href="#work" { (slot_markup(view, Slot::BtnWork)) }
                a id="btnContact" href="#contact" { (slot_markup(view, Slot::BtnContact)) }
            }
            div.stats {
                @for stat in &view.stats {
                    div.stat {
                        @let shown = match mode {
                            RevealMode::Immediate => stat.target,
                            RevealMode::Deferred => 0,
                        };
                        span.stat-count id=(counter_id(&stat.key)) data-count=(stat.target) data-stat=(stat.key) { (shown) }
                        span.stat-label id=(stat_label_id(&stat.key)) data-stat-key=(stat.key) { (stat.label) }
                    }
                }
            }
        }
    }
}

fn contact_section(view: &PageView) -> Markup {
    html! {
        section id="contact" {
            h2 id="secContact" { (slot_markup(view, Slot::SecContact)) }
            h3 id="contactHeading" { (slot_markup(view, Slot::ContactHeading)) }
            ul.contact-details {
                li id="contactEmail" { (slot_markup(view, Slot::ContactEmail)) }
                li id="contactGithub" { (slot_markup(view, Slot::ContactGithub)) }
                li id="contactLinkedin" { (slot_markup(view, Slot::ContactLinkedin)) }
            }
            form id="contactForm" {
                label id="fNameLabel" for="fName" { (slot_markup(view, Slot::FormNameLabel)) }
                input id="fName" type="text" name="name" placeholder=(view.slot(Slot::FormName));
                label id="fEmailLabel" for="fEmail" { (slot_markup(view, Slot::FormEmailLabel)) }
                input id="fEmail" type="email" name="email" placeholder=(view.slot(Slot::FormEmail));
                label id="fMsgLabel" for="fMsg" { (slot_markup(view, Slot::FormMsgLabel)) }
                textarea id="fMsg" name="message" placeholder=(view.slot(Slot::FormMsg)) {}
                button id="submitBtn" type="submit" { (slot_markup(view, Slot::SubmitBtn)) }
            }
        }
    }
}

fn site_footer(view: &PageView) -> Markup {
    html! {
        footer.site-footer {
            span id="footerCopy" { (slot_markup(view, Slot::FooterCopy)) }
            a id="footerGithub" { (slot_markup(view, Slot::FooterGithub)) }
            a id="footerLinkedin" { (slot_markup(view, Slot::FooterLinkedin)) }
            a id="footerResume" { (slot_markup(view, Slot::FooterResume)) }
        }
    }
}

/// Options for a full page document.
pub struct DocumentOptions<'a> {
    pub css: &'a str,
    pub mode: RevealMode,
    /// Value of the generator meta tag.
    pub generator: &'a str,
    /// Link target of each language's toggle button.
    pub lang_href: &'a dyn Fn(Lang) -> String,
}

/// Render the whole page for a view.
pub fn render_document(view: &PageView, opts: &DocumentOptions<'_>) -> Markup {
    let root_class = view.root_classes.join(" ");
    let title = view.slot(Slot::HeroDesc);
    let skills = render_skills(&view.skill_groups, opts.mode);
    let projects = render_projects(&view.projects);
    let experience = render_experience(&view.experience);
    let theme_color = view.theme.as_str();

    html! {
        (DOCTYPE)
        html lang=(view.lang.code()) class=(root_class) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                meta name="generator" content=(opts.generator);
                meta name="color-scheme" content=(theme_color);
                title { (title) }
                style { (PreEscaped(opts.css)) }
            }
            body {
                (site_header(view, opts.lang_href))
                main {
                    (hero(view, opts.mode))
                    section id="skills" {
                        h2 id="secSkills" { (slot_markup(view, Slot::SecSkills)) }
                        div id=(Mount::Skills.id()) { (mount_markup(&skills)) }
                    }
                    section id="work" {
                        h2 id="secWork" { (slot_markup(view, Slot::SecWork)) }
                        div id=(Mount::Projects.id()) { (mount_markup(&projects)) }
                    }
                    section id="experience" {
                        h2 id="secExp" { (slot_markup(view, Slot::SecExp)) }
                        div id=(Mount::Experience.id()) { (mount_markup(&experience)) }
                    }
                    (contact_section(view))
                }
                (site_footer(view))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Theme;
    use crate::state::PresentationState;
    use crate::test_helpers::*;
    use crate::view::build_page_view;

    fn view(lang: Lang, theme: Theme) -> PageView {
        build_page_view(
            &sample_document(),
            &PresentationState::new(lang, theme),
            &default_invert_patterns(),
        )
    }

    fn document(view: &PageView, mode: RevealMode) -> String {
        let href = |l: Lang| format!("/{}/", l.code());
        render_document(
            view,
            &DocumentOptions {
                css: "body {}",
                mode,
                generator: "folio test",
                lang_href: &href,
            },
        )
        .into_string()
    }

    #[test]
    fn single_project_row_contains_fields_and_links() {
        let rows = render_projects(&view(Lang::En, Theme::Dark).projects);
        assert_eq!(rows.len(), 1);
        let html = rows[0].markup.clone().into_string();
        for needle in ["Foo", ">A<", ">B<", ">D<"] {
            assert!(html.contains(needle), "missing {needle} in {html}");
        }
        assert!(html.contains(r#"href="https://x""#));
        assert!(html.contains(r#"href="https://y""#));
        assert_eq!(html.matches("<a ").count(), 2);
        assert!(rows[0].visible);
    }

    #[test]
    fn project_and_experience_rows_are_marked_visible() {
        let v = view(Lang::En, Theme::Dark);
        for row in render_projects(&v.projects)
            .iter()
            .chain(render_experience(&v.experience).iter())
        {
            assert!(row.markup.clone().into_string().contains("anim-row"));
            assert!(row.markup.clone().into_string().contains(" vis"));
        }
    }

    #[test]
    fn deferred_skill_rows_wait_for_reveal() {
        let rows = render_skills(&view(Lang::En, Theme::Dark).skill_groups, RevealMode::Deferred);
        assert_eq!(rows.len(), 2);
        let html = rows[0].markup.clone().into_string();
        assert!(!rows[0].visible);
        assert!(!html.contains(" vis"));
        assert!(!html.contains("width:"));
    }

    #[test]
    fn immediate_skill_rows_are_filled() {
        let rows = render_skills(&view(Lang::En, Theme::Dark).skill_groups, RevealMode::Immediate);
        let html = rows[0].markup.clone().into_string();
        assert!(rows[0].visible);
        assert!(html.contains("width: 90%"));
    }

    #[test]
    fn skill_rows_list_fill_bars() {
        let rows = render_skills(&view(Lang::En, Theme::Dark).skill_groups, RevealMode::Deferred);
        assert_eq!(
            rows[0].fills,
            vec![Fill {
                id: "skill-group-0-fill-0".into(),
                pct: 90
            }]
        );
        assert!(rows[0]
            .markup
            .clone()
            .into_string()
            .contains(r#"id="skill-group-0-fill-0""#));
        assert!(rows[1].fills.is_empty());
    }

    #[test]
    fn inverted_icons_get_marker_class() {
        let rows = render_skills(&view(Lang::En, Theme::Dark).skill_groups, RevealMode::Deferred);
        let html = rows[1].markup.clone().into_string();
        assert!(html.contains("invert-on-light"));
    }

    #[test]
    fn skill_labels_are_localized() {
        let th = render_skills(&view(Lang::Th, Theme::Dark).skill_groups, RevealMode::Deferred);
        let html = th[0].markup.clone().into_string();
        assert!(html.contains("ฟรอนต์เอนด์"));
        assert!(!html.contains("Frontend"));
    }

    #[test]
    fn row_text_is_escaped() {
        let mut v = view(Lang::En, Theme::Dark);
        v.projects[0].desc = "<script>alert('xss')</script>".to_string();
        let html = render_projects(&v.projects)[0].markup.clone().into_string();
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn document_root_carries_language_and_theme() {
        let html = document(&view(Lang::En, Theme::Light), RevealMode::Immediate);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"<html lang="en" class="scroll-smooth lang-en light">"#));
    }

    #[test]
    fn document_color_scheme_follows_theme() {
        let light = document(&view(Lang::En, Theme::Light), RevealMode::Immediate);
        assert!(light.contains(r#"<meta name="color-scheme" content="light">"#));
        let dark = document(&view(Lang::Th, Theme::Dark), RevealMode::Immediate);
        assert!(dark.contains(r#"<meta name="color-scheme" content="dark">"#));
    }

    #[test]
    fn document_marks_active_language_button() {
        let html = document(&view(Lang::Th, Theme::Dark), RevealMode::Immediate);
        assert!(html.contains(r#"class="lang-btn active" id="btnTh""#));
        assert!(html.contains(r#"class="lang-btn" id="btnEn""#));
    }

    #[test]
    fn document_hero_title_is_trusted_markup() {
        let html = document(&view(Lang::En, Theme::Dark), RevealMode::Immediate);
        assert!(html.contains("Hi, I'm <em>Nok</em>"));
    }

    #[test]
    fn document_contains_stat_label_and_counter() {
        let html = document(&view(Lang::En, Theme::Dark), RevealMode::Immediate);
        assert!(html.contains(r#"id="stat-years-label" data-stat-key="years">Years<"#));
        assert!(html.contains(r#"id="stat-years-count" data-count="5" data-stat="years">5<"#));

        let deferred = document(&view(Lang::En, Theme::Dark), RevealMode::Deferred);
        assert!(deferred.contains(r#"data-stat="years">0<"#));
    }

    #[test]
    fn document_has_every_slot_id() {
        let html = document(&view(Lang::En, Theme::Dark), RevealMode::Immediate);
        for slot in Slot::ALL {
            assert!(
                html.contains(&format!(r#"id="{}""#, slot.id())),
                "missing slot {}",
                slot.id()
            );
        }
        for mount in ["skillsList", "projectsList", "expList"] {
            assert!(html.contains(&format!(r#"id="{mount}""#)));
        }
    }

    #[test]
    fn document_placeholders_use_attribute() {
        let html = document(&view(Lang::En, Theme::Dark), RevealMode::Immediate);
        assert!(html.contains(r#"placeholder="Your email""#));
    }
}
