//! Text renderings of the map and the carousel.
//!
//! Both surfaces print to one shared sink. The surface traits cannot fail, so
//! the first write error is kept and reported when the session ends.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use cardmap_core::annotation::{annotation_view, fitting_region};
use cardmap_core::diff::Changeset;
use cardmap_core::{
    Annotation, CardDeck, CarouselError, CarouselSurface, LayoutAnimation, MapSurface, Place,
};
use geo::Rect;

/// Shared output sink.
#[derive(Debug)]
pub(crate) struct Console<W> {
    sink: RefCell<W>,
    error: RefCell<Option<io::Error>>,
}

impl<W: Write> Console<W> {
    pub(crate) fn new(sink: W) -> Rc<Self> {
        Rc::new(Self {
            sink: RefCell::new(sink),
            error: RefCell::new(None),
        })
    }

    fn line(&self, text: &str) {
        if self.error.borrow().is_some() {
            return;
        }
        let mut sink = self.sink.borrow_mut();
        if let Err(err) = writeln!(sink, "{text}").and_then(|()| sink.flush()) {
            *self.error.borrow_mut() = Some(err);
        }
    }

    /// First write error seen, if any.
    pub(crate) fn take_error(&self) -> Option<io::Error> {
        self.error.borrow_mut().take()
    }
}

fn describe_region(region: &Rect<f64>) -> String {
    let (min, max) = (region.min(), region.max());
    format!(
        "[{:.4}, {:.4}] to [{:.4}, {:.4}]",
        min.x, min.y, max.x, max.y
    )
}

/// Map surface that lists its pins.
///
/// The visible region is fixed at the configured bounds.
#[derive(Debug)]
pub(crate) struct ConsoleMap<W> {
    console: Rc<Console<W>>,
    region: Rect<f64>,
    annotations: Vec<Annotation>,
}

impl<W: Write> ConsoleMap<W> {
    pub(crate) const fn new(console: Rc<Console<W>>, region: Rect<f64>) -> Self {
        Self {
            console,
            region,
            annotations: Vec::new(),
        }
    }
}

impl<W: Write> MapSurface for ConsoleMap<W> {
    fn region(&self) -> Rect<f64> {
        self.region
    }

    fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    fn add_annotation(&mut self, annotation: Annotation) {
        self.annotations.push(annotation);
    }

    fn remove_all_annotations(&mut self) {
        self.annotations.clear();
    }

    fn show_annotations(&mut self, _animated: bool) {
        // Searches keep using the configured region; only the printed
        // viewport follows the pins.
        let viewport = fitting_region(&self.annotations).unwrap_or(self.region);
        self.console.line(&format!(
            "map: {} pins in {}",
            self.annotations.len(),
            describe_region(&viewport)
        ));
        for annotation in &self.annotations {
            let view = annotation_view(annotation);
            self.console.line(&format!(
                "  {} {} ({:.5}, {:.5})",
                view.reuse_identifier, annotation.title, annotation.location.y, annotation.location.x
            ));
        }
    }

    fn select_annotation(&mut self, annotation: &Annotation, _animated: bool) {
        self.console
            .line(&format!("map: selected {}", annotation.title));
    }
}

/// Carousel surface that prints one line per card.
#[derive(Debug)]
pub(crate) struct ConsoleCarousel<W> {
    console: Rc<Console<W>>,
    deck: CardDeck,
}

impl<W: Write> ConsoleCarousel<W> {
    pub(crate) const fn new(console: Rc<Console<W>>, deck: CardDeck) -> Self {
        Self { console, deck }
    }

    fn render(&self) {
        let cards = self.deck.cards();
        if cards.is_empty() {
            self.console.line("cards: none");
            return;
        }
        self.console.line(&format!("cards: {}", cards.len()));
        for (index, card) in cards.iter().enumerate() {
            self.console
                .line(&format!("  [{index}] {} | {}", card.title(), card.subtitle()));
        }
    }
}

impl<W: Write> CarouselSurface for ConsoleCarousel<W> {
    fn apply_changes(&mut self, changes: &Changeset, items: &[Place]) -> Result<(), CarouselError> {
        self.deck.apply(changes, items)?;
        self.render();
        Ok(())
    }

    fn scroll_to(&mut self, index: usize, _animated: bool) {
        if let Some(card) = self.deck.cards().get(index) {
            self.console
                .line(&format!("carousel: showing [{index}] {}", card.title()));
        }
    }

    fn set_bottom_offset(&mut self, offset: f64, _animation: LayoutAnimation) {
        self.console
            .line(&format!("carousel: bottom offset {offset:.0}"));
    }
}
