use crate::view::{Card, Chip, GalleryView, Notice, Slide};

/// Escape `& < > " '` so text and attribute values never become live markup.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    escape_html_into(&mut out, s);
    out
}

fn escape_html_into(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}

pub fn chip_markup(chip: &Chip) -> String {
    format!(
        r#"<button type="button" class="chip{active}" aria-pressed="{pressed}">{label}</button>"#,
        active = if chip.active { " active" } else { "" },
        pressed = chip.active,
        label = escape_html(&chip.label),
    )
}

/// Card markup. Cards are focusable buttons; Enter, Space and click all open
/// the lightbox at `data-index`.
pub fn card_markup(card: &Card) -> String {
    format!(
        r#"<article class="card" tabindex="0" role="button" aria-label="{aria}" data-index="{index}">
  <img loading="lazy" src="{src}" alt="{alt}" />
  <div class="info">
    <div class="title">{title}</div>
    <div class="meta">{category}</div>
  </div>
</article>"#,
        aria = escape_html(&card.aria_label),
        index = card.index,
        src = escape_html(&card.thumb_src),
        alt = escape_html(&card.alt),
        title = escape_html(&card.title),
        category = escape_html(&card.category),
    )
}

/// Static HTML rendering surface.
///
/// Each region is kept as a markup fragment; [`HtmlView::page`] assembles them
/// into a document using the element ids the gallery stylesheet expects.
#[derive(Debug, Default)]
pub struct HtmlView {
    chips: String,
    grid: String,
    notice: Option<String>,
    slide: Option<Slide>,
    scroll_locked: bool,
}

impl HtmlView {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn chips_html(&self) -> &str {
        &self.chips
    }

    #[cfg(test)]
    pub fn grid_html(&self) -> &str {
        &self.grid
    }

    pub fn notice_text(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    #[cfg(test)]
    pub fn is_scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    fn notice_html(&self) -> String {
        match &self.notice {
            Some(text) => format!(
                r#"<p id="emptyNotice" class="notice">{}</p>"#,
                escape_html(text)
            ),
            None => r#"<p id="emptyNotice" class="notice hidden"></p>"#.to_string(),
        }
    }

    fn lightbox_html(&self) -> String {
        let (hidden, src, alt, title, caption) = match &self.slide {
            Some(slide) => (
                "",
                escape_html(&slide.src),
                escape_html(&slide.alt),
                escape_html(&slide.title),
                escape_html(&slide.caption),
            ),
            None => (" hidden", String::new(), String::new(), String::new(), String::new()),
        };
        format!(
            r#"<div id="lightbox" class="lightbox{hidden}" aria-modal="true" role="dialog">
  <button id="lbClose" type="button" aria-label="Close">&times;</button>
  <button id="lbPrev" type="button" aria-label="Previous">&#8249;</button>
  <figure>
    <img id="lbImg" src="{src}" alt="{alt}" />
    <figcaption><div id="lbTitle">{title}</div><div id="lbMeta">{caption}</div></figcaption>
  </figure>
  <button id="lbNext" type="button" aria-label="Next">&#8250;</button>
</div>"#
        )
    }

    /// Full document for the current state of every region.
    pub fn page(&self, heading: &str, query: &str) -> String {
        let body_style = if self.scroll_locked {
            r#" style="overflow:hidden""#
        } else {
            ""
        };
        format!(
            r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8" />
<meta name="viewport" content="width=device-width, initial-scale=1" />
<title>{heading}</title>
<link rel="stylesheet" href="assets/css/style.css" />
</head>
<body{body_style}>
<header><h1>{heading}</h1></header>
<main>
<div class="toolbar">
<nav id="filters" class="filters">
{chips}
</nav>
<input id="search" type="search" placeholder="Search" value="{query}" />
</div>
{notice}
<section id="grid" class="grid">
{grid}
</section>
</main>
{lightbox}
</body>
</html>
"#,
            heading = escape_html(heading),
            chips = self.chips,
            query = escape_html(query),
            notice = self.notice_html(),
            grid = self.grid,
            lightbox = self.lightbox_html(),
        )
    }
}

impl GalleryView for HtmlView {
    fn render_chips(&mut self, chips: &[Chip]) {
        self.chips = chips.iter().map(chip_markup).collect::<Vec<_>>().join("\n");
    }

    fn render_grid(&mut self, cards: &[Card]) {
        self.grid = cards.iter().map(card_markup).collect::<Vec<_>>().join("\n");
    }

    fn show_notice(&mut self, _notice: Notice, text: &str) {
        self.notice = Some(text.to_string());
    }

    fn hide_notice(&mut self) {
        self.notice = None;
    }

    fn open_overlay(&mut self, slide: &Slide) {
        self.slide = Some(slide.clone());
        self.scroll_locked = true;
    }

    fn close_overlay(&mut self) {
        self.slide = None;
        self.scroll_locked = false;
    }
}
