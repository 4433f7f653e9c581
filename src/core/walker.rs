//! Depth-first search for text-bearing nodes.
//!
//! [`text_nodes`] walks a document in pre-order and yields every map that
//! carries a `SourceString`, together with the chain of containers leading to
//! it. Whether a map qualifies is decided by [`RULES`], an ordered list of
//! guards evaluated top to bottom; the first guard that returns a verdict
//! wins. Several guards exist only to suppress a second view of a text
//! constant that an enclosing wrapper already yielded.

use std::{fmt, rc::Rc};

use serde_json::{Map, Value};

use super::fields::{
    EXPRESSION, INST, SOURCE_STRING, STRING_CONST, TEXT_CONST, VALUE, has_tag, is_full_text,
    is_namespaced,
};

/// How a container was entered: by map field or by list index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Key(&'a str),
    Index(usize),
}

impl<'a> Segment<'a> {
    pub fn as_key(&self) -> Option<&'a str> {
        match self {
            Segment::Key(key) => Some(key),
            Segment::Index(_) => None,
        }
    }
}

impl fmt::Display for Segment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(key) => write!(f, "{}", key),
            Segment::Index(index) => write!(f, "{}", index),
        }
    }
}

/// One step of an ancestry chain: the container and the segment taken out of it.
#[derive(Debug, Clone, Copy)]
pub struct Ancestor<'a> {
    pub container: &'a Value,
    pub segment: Segment<'a>,
}

impl<'a> Ancestor<'a> {
    pub fn as_map(&self) -> Option<&'a Map<String, Value>> {
        self.container.as_object()
    }
}

struct Link<'a> {
    step: Ancestor<'a>,
    up: Option<Rc<Link<'a>>>,
}

/// Persistent path from the document root to the current node.
///
/// Extending a chain shares the existing prefix, so every node can keep its
/// own chain without copying. Iteration runs from the nearest container out
/// to the root, which is the order every ancestor query needs.
#[derive(Clone, Default)]
pub struct Ancestry<'a> {
    head: Option<Rc<Link<'a>>>,
    len: usize,
}

impl<'a> Ancestry<'a> {
    pub fn root() -> Self {
        Self::default()
    }

    /// Chain for a child reached from `container` through `segment`.
    pub fn child(&self, container: &'a Value, segment: Segment<'a>) -> Self {
        Self {
            head: Some(Rc::new(Link {
                step: Ancestor { container, segment },
                up: self.head.clone(),
            })),
            len: self.len + 1,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Nearest-first iteration.
    pub fn iter(&self) -> AncestryIter<'a, '_> {
        AncestryIter {
            next: self.head.as_deref(),
        }
    }

    /// Nearest-first iteration over the ancestors that are maps.
    pub fn maps(&self) -> impl Iterator<Item = &'a Map<String, Value>> + '_ {
        self.iter().filter_map(|ancestor| ancestor.as_map())
    }

    /// The immediate container, if any.
    pub fn parent(&self) -> Option<Ancestor<'a>> {
        self.head.as_ref().map(|link| link.step)
    }

    /// Root-first copy of the chain.
    pub fn root_first(&self) -> Vec<Ancestor<'a>> {
        let mut steps: Vec<_> = self.iter().collect();
        steps.reverse();
        steps
    }
}

impl fmt::Debug for Ancestry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path: Vec<String> = self
            .root_first()
            .iter()
            .map(|a| a.segment.to_string())
            .collect();
        write!(f, "Ancestry({})", path.join("/"))
    }
}

pub struct AncestryIter<'a, 'r> {
    next: Option<&'r Link<'a>>,
}

impl<'a> Iterator for AncestryIter<'a, '_> {
    type Item = Ancestor<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let link = self.next?;
        self.next = link.up.as_deref();
        Some(link.step)
    }
}

/// Which rule made a node qualify.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// `Value` of an `EX_TextConst` found under a node's `Expression` field.
    WrappedConstant,
    /// `Value` of a node that is itself an `EX_TextConst`.
    InlineConstant,
    /// Carries `SourceString`, `KeyString` and `Namespace` directly.
    Namespaced,
    /// Carries `SourceString` and nothing that identifies it further.
    Bare,
}

/// A text-bearing map and the chain of containers above it.
#[derive(Debug, Clone)]
pub struct TextNode<'a> {
    pub node: &'a Map<String, Value>,
    pub ancestry: Ancestry<'a>,
    pub shape: Shape,
}

impl<'a> TextNode<'a> {
    pub fn parent(&self) -> Option<&'a Value> {
        self.ancestry.parent().map(|a| a.container)
    }

    pub fn parent_map(&self) -> Option<&'a Map<String, Value>> {
        self.parent().and_then(Value::as_object)
    }

    /// Field or index under which the node sits in its parent.
    pub fn parent_key(&self) -> Option<Segment<'a>> {
        self.ancestry.parent().map(|a| a.segment)
    }
}

/// Outcome of a qualification rule that applied.
enum Verdict<'a> {
    Yield(TextNode<'a>),
    Suppress,
}

/// A map node under inspection.
struct Probe<'a, 'p> {
    map: &'a Map<String, Value>,
    value: &'a Value,
    ancestry: &'p Ancestry<'a>,
}

impl<'a> Probe<'a, '_> {
    fn has_source(&self) -> bool {
        self.map.contains_key(SOURCE_STRING)
    }

    fn parent_map(&self) -> Option<&'a Map<String, Value>> {
        self.ancestry.parent().and_then(|a| a.as_map())
    }

    fn parent_segment(&self) -> Option<Segment<'a>> {
        self.ancestry.parent().map(|a| a.segment)
    }
}

type Rule = for<'a, 'p> fn(&Probe<'a, 'p>) -> Option<Verdict<'a>>;

/// Qualification rules, highest priority first.
const RULES: [Rule; 9] = [
    wrapped_constant,
    claimed_expression,
    inline_constant,
    claimed_payload,
    under_namespaced_parent,
    under_namespaced_ancestor,
    under_string_constant,
    namespaced_text,
    bare_text,
];

/// `Value` payload of an `EX_TextConst` map, if it carries the full text triple.
fn text_const_payload(map: &Map<String, Value>) -> Option<&Map<String, Value>> {
    if !has_tag(map, INST, TEXT_CONST) {
        return None;
    }
    map.get(VALUE)
        .and_then(Value::as_object)
        .filter(|payload| is_full_text(payload))
}

/// Payload of a text constant held under the map's `Expression` field.
fn expression_payload(map: &Map<String, Value>) -> Option<(&Value, &Map<String, Value>)> {
    let expression = map.get(EXPRESSION)?;
    let payload = text_const_payload(expression.as_object()?)?;
    Some((expression, payload))
}

fn wrapped_constant<'a>(probe: &Probe<'a, '_>) -> Option<Verdict<'a>> {
    let (expression, payload) = expression_payload(probe.map)?;
    let ancestry = probe
        .ancestry
        .child(probe.value, Segment::Key(EXPRESSION))
        .child(expression, Segment::Key(VALUE));
    Some(Verdict::Yield(TextNode {
        node: payload,
        ancestry,
        shape: Shape::WrappedConstant,
    }))
}

/// The text constant was already yielded through its parent's `Expression`.
fn claimed_expression<'a>(probe: &Probe<'a, '_>) -> Option<Verdict<'a>> {
    let reached_as_expression = probe.parent_segment() == Some(Segment::Key(EXPRESSION))
        && probe.parent_map().is_some();
    (reached_as_expression && text_const_payload(probe.map).is_some()).then_some(Verdict::Suppress)
}

fn inline_constant<'a>(probe: &Probe<'a, '_>) -> Option<Verdict<'a>> {
    let payload = text_const_payload(probe.map)?;
    Some(Verdict::Yield(TextNode {
        node: payload,
        ancestry: probe.ancestry.child(probe.value, Segment::Key(VALUE)),
        shape: Shape::InlineConstant,
    }))
}

/// The payload itself, reached again by plain recursion.
fn claimed_payload<'a>(probe: &Probe<'a, '_>) -> Option<Verdict<'a>> {
    if probe.parent_segment() != Some(Segment::Key(VALUE)) {
        return None;
    }
    let parent = probe.parent_map()?;
    let yielded_by_parent =
        expression_payload(parent).is_none() && text_const_payload(parent).is_some();
    yielded_by_parent.then_some(Verdict::Suppress)
}

fn under_namespaced_parent<'a>(probe: &Probe<'a, '_>) -> Option<Verdict<'a>> {
    let parent = probe.parent_map()?;
    (probe.has_source() && is_namespaced(parent)).then_some(Verdict::Suppress)
}

fn under_namespaced_ancestor<'a>(probe: &Probe<'a, '_>) -> Option<Verdict<'a>> {
    let nested = probe.has_source()
        && probe
            .ancestry
            .iter()
            .skip(1)
            .filter_map(|a| a.as_map())
            .any(is_namespaced);
    nested.then_some(Verdict::Suppress)
}

fn under_string_constant<'a>(probe: &Probe<'a, '_>) -> Option<Verdict<'a>> {
    let parent = probe.parent_map()?;
    (probe.has_source() && has_tag(parent, INST, STRING_CONST)).then_some(Verdict::Suppress)
}

fn namespaced_text<'a>(probe: &Probe<'a, '_>) -> Option<Verdict<'a>> {
    is_full_text(probe.map).then(|| {
        Verdict::Yield(TextNode {
            node: probe.map,
            ancestry: probe.ancestry.clone(),
            shape: Shape::Namespaced,
        })
    })
}

fn bare_text<'a>(probe: &Probe<'a, '_>) -> Option<Verdict<'a>> {
    probe.has_source().then(|| {
        Verdict::Yield(TextNode {
            node: probe.map,
            ancestry: probe.ancestry.clone(),
            shape: Shape::Bare,
        })
    })
}

fn qualify<'a>(probe: &Probe<'a, '_>) -> Option<TextNode<'a>> {
    match RULES.iter().find_map(|rule| rule(probe))? {
        Verdict::Yield(node) => Some(node),
        Verdict::Suppress => None,
    }
}

/// Lazy pre-order iterator over the text-bearing nodes of a document.
pub struct TextNodes<'a> {
    stack: Vec<(&'a Value, Ancestry<'a>)>,
}

/// Text-bearing nodes of `root` in document order.
///
/// A node is produced before anything nested inside it; map fields follow
/// document order and list items follow index order.
pub fn text_nodes(root: &Value) -> TextNodes<'_> {
    TextNodes {
        stack: vec![(root, Ancestry::root())],
    }
}

impl<'a> TextNodes<'a> {
    fn push_children(&mut self, value: &'a Value, ancestry: &Ancestry<'a>) {
        match value {
            Value::Object(map) => {
                for (key, child) in map.iter().rev() {
                    let chain = ancestry.child(value, Segment::Key(key.as_str()));
                    self.stack.push((child, chain));
                }
            }
            Value::Array(items) => {
                for (index, child) in items.iter().enumerate().rev() {
                    let chain = ancestry.child(value, Segment::Index(index));
                    self.stack.push((child, chain));
                }
            }
            _ => {}
        }
    }
}

impl<'a> Iterator for TextNodes<'a> {
    type Item = TextNode<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((value, ancestry)) = self.stack.pop() {
            self.push_children(value, &ancestry);
            if let Value::Object(map) = value {
                let probe = Probe {
                    map,
                    value,
                    ancestry: &ancestry,
                };
                if let Some(found) = qualify(&probe) {
                    return Some(found);
                }
            }
        }
        None
    }
}
