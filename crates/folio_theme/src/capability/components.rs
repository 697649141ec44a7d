//! Built-in capabilities of the library client and their two implementations

use super::{resolve, Capability, Component, RenderContext, StyleHints, ViewNode};

// ============================================================================
// Capabilities and props
// ============================================================================

/// A single book tile with title, author and reading progress
pub struct BookCard;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct BookCardProps {
    pub title: String,
    pub author: String,
    /// Reading progress in `0.0..=1.0`
    pub progress: Option<f32>,
    pub favorite: bool,
}

impl BookCardProps {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            ..Default::default()
        }
    }

    pub fn progress(mut self, progress: f32) -> Self {
        self.progress = Some(progress.clamp(0.0, 1.0));
        self
    }

    pub fn favorite(mut self, favorite: bool) -> Self {
        self.favorite = favorite;
        self
    }
}

impl Capability for BookCard {
    const NAME: &'static str = "BookCard";
    type Props = BookCardProps;
}

/// A collection of book cards
pub struct BookGrid;

#[derive(Clone, Debug, PartialEq)]
pub struct BookGridProps {
    pub books: Vec<BookCardProps>,
    pub columns: u8,
}

impl Capability for BookGrid {
    const NAME: &'static str = "BookGrid";
    type Props = BookGridProps;
}

pub struct SearchBox;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchBoxProps {
    pub query: String,
    pub placeholder: String,
}

impl Capability for SearchBox {
    const NAME: &'static str = "SearchBox";
    type Props = SearchBoxProps;
}

pub struct Button;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ButtonKind {
    #[default]
    Primary,
    Secondary,
    Ghost,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ButtonProps {
    pub label: String,
    pub kind: ButtonKind,
    pub disabled: bool,
}

impl Capability for Button {
    const NAME: &'static str = "Button";
    type Props = ButtonProps;
}

/// Dashboard statistic tile
pub struct StatCard;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct StatCardProps {
    pub label: String,
    pub value: String,
    /// Relative change since the previous period
    pub trend: Option<f32>,
}

impl Capability for StatCard {
    const NAME: &'static str = "StatCard";
    type Props = StatCardProps;
}

/// Sign-in / sign-up form
pub struct AuthForm;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    SignIn,
    SignUp,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthFormProps {
    pub mode: AuthMode,
    pub email: String,
    pub error: Option<String>,
    pub submitting: bool,
}

impl Capability for AuthForm {
    const NAME: &'static str = "AuthForm";
    type Props = AuthFormProps;
}

// ============================================================================
// Shared helpers
// ============================================================================

fn percent(progress: f32) -> String {
    format!("{:.0}%", progress.clamp(0.0, 1.0) * 100.0)
}

fn trend_label(trend: f32) -> String {
    if trend >= 0.0 {
        format!("+{:.0}%", trend * 100.0)
    } else {
        format!("{:.0}%", trend * 100.0)
    }
}

fn auth_title(mode: AuthMode) -> &'static str {
    match mode {
        AuthMode::SignIn => "Sign in",
        AuthMode::SignUp => "Create account",
    }
}

fn render_books(props: &BookGridProps, cx: &RenderContext, mut grid: ViewNode) -> ViewNode {
    let card = resolve::<BookCard>(cx.variant);
    for book in &props.books {
        grid = grid.child(card.render(book, cx));
    }
    grid
}

// ============================================================================
// Classic implementations
// ============================================================================

pub struct ClassicBookCard;

impl Component<BookCard> for ClassicBookCard {
    fn implementation(&self) -> &'static str {
        "ClassicBookCard"
    }

    fn render(&self, props: &BookCardProps, cx: &RenderContext) -> ViewNode {
        let mut node = ViewNode::new(
            BookCard::NAME,
            self.implementation(),
            cx.variant,
            StyleHints::classic(6.0),
        )
        .text(&props.title)
        .text(&props.author);
        if let Some(progress) = props.progress {
            node = node.text(percent(progress));
        }
        if props.favorite {
            node = node.text("★");
        }
        node
    }
}

pub struct ClassicBookGrid;

impl Component<BookGrid> for ClassicBookGrid {
    fn implementation(&self) -> &'static str {
        "ClassicBookGrid"
    }

    fn render(&self, props: &BookGridProps, cx: &RenderContext) -> ViewNode {
        let grid = ViewNode::new(
            BookGrid::NAME,
            self.implementation(),
            cx.variant,
            StyleHints::classic(0.0),
        )
        .text(format!("{} books", props.books.len()));
        render_books(props, cx, grid)
    }
}

pub struct ClassicSearchBox;

impl Component<SearchBox> for ClassicSearchBox {
    fn implementation(&self) -> &'static str {
        "ClassicSearchBox"
    }

    fn render(&self, props: &SearchBoxProps, cx: &RenderContext) -> ViewNode {
        let shown = if props.query.is_empty() {
            &props.placeholder
        } else {
            &props.query
        };
        ViewNode::new(
            SearchBox::NAME,
            self.implementation(),
            cx.variant,
            StyleHints::classic(4.0),
        )
        .text(shown)
    }
}

pub struct ClassicButton;

impl Component<Button> for ClassicButton {
    fn implementation(&self) -> &'static str {
        "ClassicButton"
    }

    fn render(&self, props: &ButtonProps, cx: &RenderContext) -> ViewNode {
        let mut style = StyleHints::classic(4.0);
        if props.kind == ButtonKind::Ghost {
            style.fill_opacity = 0.0;
        }
        ViewNode::new(Button::NAME, self.implementation(), cx.variant, style)
            .text(&props.label)
            .disabled(props.disabled)
    }
}

pub struct ClassicStatCard;

impl Component<StatCard> for ClassicStatCard {
    fn implementation(&self) -> &'static str {
        "ClassicStatCard"
    }

    fn render(&self, props: &StatCardProps, cx: &RenderContext) -> ViewNode {
        let mut node = ViewNode::new(
            StatCard::NAME,
            self.implementation(),
            cx.variant,
            StyleHints::classic(6.0),
        )
        .text(&props.label)
        .text(&props.value);
        if let Some(trend) = props.trend {
            node = node.text(trend_label(trend));
        }
        node
    }
}

pub struct ClassicAuthForm;

impl Component<AuthForm> for ClassicAuthForm {
    fn implementation(&self) -> &'static str {
        "ClassicAuthForm"
    }

    fn render(&self, props: &AuthFormProps, cx: &RenderContext) -> ViewNode {
        let mut node = ViewNode::new(
            AuthForm::NAME,
            self.implementation(),
            cx.variant,
            StyleHints::classic(8.0),
        )
        .text(auth_title(props.mode))
        .text(&props.email)
        .disabled(props.submitting);
        if let Some(error) = &props.error {
            node = node.text(error);
        }
        node
    }
}

// ============================================================================
// Glass implementations
// ============================================================================

pub struct GlassBookCard;

impl Component<BookCard> for GlassBookCard {
    fn implementation(&self) -> &'static str {
        "GlassBookCard"
    }

    fn render(&self, props: &BookCardProps, cx: &RenderContext) -> ViewNode {
        let mut node = ViewNode::new(
            BookCard::NAME,
            self.implementation(),
            cx.variant,
            StyleHints::glass(cx.parameters, 16.0),
        )
        .text(&props.title)
        .text(&props.author);
        if let Some(progress) = props.progress {
            node = node.text(format!("{} read", percent(progress)));
        }
        if props.favorite {
            node = node.text("♥");
        }
        node
    }
}

pub struct GlassBookGrid;

impl Component<BookGrid> for GlassBookGrid {
    fn implementation(&self) -> &'static str {
        "GlassBookGrid"
    }

    fn render(&self, props: &BookGridProps, cx: &RenderContext) -> ViewNode {
        // The grid itself is a transparent container; only the cards are frosted
        let mut style = StyleHints::glass(cx.parameters, 24.0);
        style.fill_opacity = 0.0;
        let grid = ViewNode::new(BookGrid::NAME, self.implementation(), cx.variant, style)
            .text(format!("{} books", props.books.len()));
        render_books(props, cx, grid)
    }
}

pub struct GlassSearchBox;

impl Component<SearchBox> for GlassSearchBox {
    fn implementation(&self) -> &'static str {
        "GlassSearchBox"
    }

    fn render(&self, props: &SearchBoxProps, cx: &RenderContext) -> ViewNode {
        let shown = if props.query.is_empty() {
            &props.placeholder
        } else {
            &props.query
        };
        ViewNode::new(
            SearchBox::NAME,
            self.implementation(),
            cx.variant,
            StyleHints::glass(cx.parameters, 999.0),
        )
        .text(shown)
    }
}

pub struct GlassButton;

impl Component<Button> for GlassButton {
    fn implementation(&self) -> &'static str {
        "GlassButton"
    }

    fn render(&self, props: &ButtonProps, cx: &RenderContext) -> ViewNode {
        let mut style = StyleHints::glass(cx.parameters, 12.0);
        match props.kind {
            ButtonKind::Primary => style.fill_opacity = cx.parameters.peak_opacity,
            ButtonKind::Secondary => {}
            ButtonKind::Ghost => style.fill_opacity = 0.0,
        }
        ViewNode::new(Button::NAME, self.implementation(), cx.variant, style)
            .text(&props.label)
            .disabled(props.disabled)
    }
}

pub struct GlassStatCard;

impl Component<StatCard> for GlassStatCard {
    fn implementation(&self) -> &'static str {
        "GlassStatCard"
    }

    fn render(&self, props: &StatCardProps, cx: &RenderContext) -> ViewNode {
        let mut node = ViewNode::new(
            StatCard::NAME,
            self.implementation(),
            cx.variant,
            StyleHints::glass(cx.parameters, 20.0),
        )
        .text(&props.value)
        .text(&props.label);
        if let Some(trend) = props.trend {
            node = node.text(trend_label(trend));
        }
        node
    }
}

pub struct GlassAuthForm;

impl Component<AuthForm> for GlassAuthForm {
    fn implementation(&self) -> &'static str {
        "GlassAuthForm"
    }

    fn render(&self, props: &AuthFormProps, cx: &RenderContext) -> ViewNode {
        let mut node = ViewNode::new(
            AuthForm::NAME,
            self.implementation(),
            cx.variant,
            StyleHints::glass(cx.parameters, 28.0),
        )
        .text(auth_title(props.mode))
        .text(&props.email)
        .disabled(props.submitting);
        if let Some(error) = &props.error {
            node = node.text(error);
        }
        node
    }
}

capabilities! {
    book_card: BookCard => { classic: ClassicBookCard, glass: GlassBookCard },
    book_grid: BookGrid => { classic: ClassicBookGrid, glass: GlassBookGrid },
    search_box: SearchBox => { classic: ClassicSearchBox, glass: GlassSearchBox },
    button: Button => { classic: ClassicButton, glass: GlassButton },
    stat_card: StatCard => { classic: ClassicStatCard, glass: GlassStatCard },
    auth_form: AuthForm => { classic: ClassicAuthForm, glass: GlassAuthForm },
}
