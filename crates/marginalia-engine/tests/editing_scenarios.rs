use std::cell::RefCell;
use std::rc::Rc;

use marginalia_engine::editing::mutations::{remove_highlight, update_comment};
use marginalia_engine::editing::selection::expand_selection_boundary;
use marginalia_engine::parsing::parse_highlights;
use marginalia_engine::popover::{AnchorPosition, PopoverEvent, PopoverView, Surface};
use marginalia_engine::{AnnotationError, Cmd, Document, Editor, Transaction};
use pretty_assertions::assert_eq;
use rstest::rstest;

/// Surface that anchors every region and counts mounted popovers.
#[derive(Default)]
struct CountingSurface {
    live: Rc<RefCell<usize>>,
    peak: Rc<RefCell<usize>>,
    mounted: Rc<RefCell<Vec<String>>>,
}

impl Surface for CountingSurface {
    type Handle = usize;

    fn mount(&mut self, view: &PopoverView) -> usize {
        let mut live = self.live.borrow_mut();
        *live += 1;
        let mut peak = self.peak.borrow_mut();
        *peak = (*peak).max(*live);
        let mut mounted = self.mounted.borrow_mut();
        mounted.push(view.comment.clone());
        mounted.len()
    }

    fn unmount(&mut self, _handle: usize) {
        *self.live.borrow_mut() -= 1;
    }

    fn locate(&self, from: usize, to: usize) -> Option<AnchorPosition> {
        Some(AnchorPosition {
            x: (from + to) as f32 / 2.0,
            y: 10.0,
        })
    }
}

fn editor(text: &str) -> (Editor<CountingSurface>, Rc<RefCell<Vec<String>>>) {
    let notices = Rc::new(RefCell::new(Vec::new()));
    let sink = notices.clone();
    let editor = Editor::new(
        Document::from_text(text),
        CountingSurface::default(),
        move |m: &str| sink.borrow_mut().push(m.to_string()),
    );
    (editor, notices)
}

#[test]
fn hello_world_scenario() {
    let (mut ed, notices) = editor("Hello world");

    ed.set_selection(6..11);
    ed.create_highlight().unwrap();
    assert_eq!(ed.text(), "Hello ==world==");

    let region = ed.regions().iter().next().cloned().unwrap();
    ed.update_comment(&region, "note").unwrap();
    assert_eq!(ed.text(), "Hello ==world==<!--note-->");

    let region = ed.regions().iter().next().cloned().unwrap();
    assert_eq!(region.comment.as_deref(), Some("note"));
    ed.remove_highlight(&region).unwrap();
    assert_eq!(ed.text(), "Hello world");

    assert!(ed.regions().is_empty());
    assert!(notices.borrow().is_empty());
}

#[test]
fn hello_world_through_the_popover() {
    let (mut ed, _) = editor("Hello world");

    ed.set_selection(6..11);
    ed.create_highlight().unwrap();
    assert_eq!(ed.run_deferred(), 1);

    for c in "note".chars() {
        ed.popover_event(PopoverEvent::Input(c));
    }
    ed.popover_event(PopoverEvent::Enter { shift: false });
    assert_eq!(ed.text(), "Hello ==world==<!--note-->");
    assert!(!ed.popover().is_open());

    assert!(ed.click(8));
    assert_eq!(
        ed.popover().view().map(|v| v.comment.as_str()),
        Some("note")
    );
    ed.popover_event(PopoverEvent::RemoveClicked);
    assert_eq!(ed.text(), "Hello world");
}

#[test]
fn removal_leaves_no_matches_over_the_span() {
    let text = "a ==b==<!--c--> d";
    let m = parse_highlights(text).remove(0);
    let edit = remove_highlight(&m);

    let mut doc = Document::from_text(text);
    doc.apply(edit.into());

    assert_eq!(doc.text(), "a b d");
    assert!(parse_highlights(&doc.text()).is_empty());
}

#[rstest]
#[case::cleared("", None)]
#[case::blank("   ", None)]
#[case::set("fresh", Some("fresh"))]
fn comment_round_trip(#[case] comment: &str, #[case] expected: Option<&str>) {
    let text = "==x==<!--old-->";
    let m = parse_highlights(text).remove(0);

    let mut doc = Document::from_text(text);
    doc.apply(update_comment(&m, comment).unwrap().into());

    let reparsed = parse_highlights(&doc.text());
    assert_eq!(reparsed.len(), 1);
    assert_eq!(reparsed[0].comment.as_deref(), expected);
    assert_eq!(reparsed[0].has_annotation(), expected.is_some());
}

#[test]
fn forbidden_comment_is_rejected_without_edit() {
    let (mut ed, notices) = editor("==x==");
    let region = ed.regions().iter().next().cloned().unwrap();

    assert_eq!(
        ed.update_comment(&region, "a-->b"),
        Err(AnnotationError::InvalidComment)
    );
    assert_eq!(ed.text(), "==x==");
    assert_eq!(notices.borrow().len(), 1);
}

#[test]
fn two_line_selection_is_rejected_without_edit() {
    let (mut ed, notices) = editor("first line\nsecond line");
    ed.set_selection(6..17);

    let err = ed.create_highlight().unwrap_err();
    assert!(matches!(err, AnnotationError::InvalidSelection(_)));
    assert_eq!(ed.text(), "first line\nsecond line");
    assert_eq!(
        *notices.borrow(),
        vec!["Only same line highlights are supported. Sorry!".to_string()]
    );
}

#[test]
fn already_highlighted_selection_is_rejected() {
    let (mut ed, notices) = editor("some ==marked== text");
    ed.set_selection(0..20);

    assert_eq!(
        ed.create_highlight(),
        Err(AnnotationError::AlreadyHighlighted)
    );
    assert_eq!(ed.text(), "some ==marked== text");
    assert_eq!(
        *notices.borrow(),
        vec!["Selection already contains a highlight".to_string()]
    );
}

#[test]
fn partial_word_expands_to_whole_word() {
    let line = "The quick fox";
    let expanded = expand_selection_boundary(line, 4..8);
    assert_eq!(&line[expanded], "quick");

    let (mut ed, _) = editor(line);
    ed.set_selection(4..8);
    ed.create_highlight().unwrap();
    assert_eq!(ed.text(), "The ==quick== fox");
}

#[test]
fn second_popover_replaces_first() {
    let surface = CountingSurface::default();
    let live = surface.live.clone();
    let peak = surface.peak.clone();
    let mounted = surface.mounted.clone();
    let mut ed = Editor::new(
        Document::from_text("==a==<!--one--> ==b==<!--two-->"),
        surface,
        |_: &str| {},
    );

    assert!(ed.click(1));
    assert!(ed.click(17));

    assert_eq!(*live.borrow(), 1);
    assert_eq!(*peak.borrow(), 1);
    assert_eq!(*mounted.borrow(), vec!["one".to_string(), "two".to_string()]);
    assert_eq!(ed.popover().view().map(|v| v.comment.as_str()), Some("two"));

    drop(ed);
    assert_eq!(*live.borrow(), 0);
}

#[test]
fn selection_moves_keep_regions() {
    let (mut ed, _) = editor("x ==a== y ==b==<!--c-->");
    let before = ed.regions().clone();

    ed.set_selection(0..1);
    ed.set_selection(9..9);

    assert_eq!(ed.regions(), &before);
}

#[test]
fn edits_before_a_highlight_shift_its_region() {
    let (mut ed, _) = editor("x ==a==");
    ed.dispatch(Transaction::edit(Cmd::InsertText {
        at: 0,
        text: "abc ".to_string(),
    }));

    let region = ed.regions().iter().next().unwrap();
    assert_eq!((region.from, region.to), (6, 11));
    assert_eq!(&ed.text()[region.from..region.to], "==a==");
}
