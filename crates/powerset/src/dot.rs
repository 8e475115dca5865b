//! Graphviz DOT output for automata

use std::{
    borrow::Cow,
    collections::BTreeMap,
    fmt::{self, Display},
};

use indexmap::IndexMap;

macro_rules! attr {
    ($id:ident, $name:literal) => {
        pub fn $id<S: Into<Cow<'a, str>>>(&mut self, $id: S) -> &mut Self {
            self.attrs.insert($name, $id.into());
            self
        }
    };
}

type Attrs<'a> = BTreeMap<&'static str, Cow<'a, str>>;

/// A directed graph
#[derive(Debug, Default)]
pub struct Graph<'a> {
    attrs: Attrs<'a>,
    nodes: IndexMap<Cow<'a, str>, Node<'a>>,
    edges: Vec<(Cow<'a, str>, Cow<'a, str>, Edge<'a>)>,
}

impl<'a> Graph<'a> {
    attr!(label, "label");

    attr!(rank_dir, "rankdir");

    #[must_use]
    pub fn new() -> Self { Self::default() }

    pub fn node<S: Into<Cow<'a, str>>>(&mut self, id: S) -> &mut Node<'a> {
        self.nodes.entry(id.into()).or_default()
    }

    pub fn edge<L: Into<Cow<'a, str>>, R: Into<Cow<'a, str>>>(
        &mut self,
        l: L,
        r: R,
    ) -> &mut Edge<'a> {
        let l = l.into();
        let r = r.into();
        self.node(l.clone());
        self.node(r.clone());
        self.edges.push((l, r, Edge::default()));
        &mut self.edges.last_mut().unwrap_or_else(|| unreachable!()).2
    }

    /// Lay out a state machine given each state with its outgoing edges and
    /// whether it accepts
    pub(crate) fn state_machine<
        S: Copy + Display,
        L,
        IN: IntoIterator<Item = (S, IE, bool)>,
        IE: IntoIterator<Item = (L, S)>,
    >(
        states: IN,
        start: S,
        fmt_label: impl Fn(L) -> Cow<'a, str>,
    ) -> Self {
        fn id<S: Display>(s: S) -> Cow<'static, str> { format!("n{s}").into() }

        let mut graph = Self::new();
        graph.rank_dir("LR");

        for (state, edges, accept) in states {
            let node = graph.node(id(state));
            node.label(state.to_string());

            if accept {
                node.border_count("2");
            }

            for (label, target) in edges {
                graph.edge(id(state), id(target)).label(fmt_label(label));
            }
        }

        graph.node("_start").style("invis").shape("point").label("");
        graph.edge("_start", id(start));

        graph
    }
}

fn write_attrs(f: &mut fmt::Formatter, attrs: &Attrs) -> fmt::Result {
    for (i, (key, val)) in attrs.iter().enumerate() {
        f.write_str(if i == 0 { "[" } else { "," })?;
        write!(f, "{key}={val:?}")?;
    }

    if attrs.is_empty() {
        Ok(())
    } else {
        f.write_str("]")
    }
}

impl Display for Graph<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let Self {
            attrs,
            nodes,
            edges,
        } = self;

        f.write_str("digraph {")?;

        for (key, val) in attrs {
            write!(f, "{key}={val:?};")?;
        }

        for (id, Node { attrs }) in nodes {
            write!(f, "{id:?}")?;
            write_attrs(f, attrs)?;
            f.write_str(";")?;
        }

        for (l, r, Edge { attrs }) in edges {
            write!(f, "{l:?}->{r:?}")?;
            write_attrs(f, attrs)?;
            f.write_str(";")?;
        }

        f.write_str("}")
    }
}

#[derive(Debug, Default)]
pub struct Node<'a> {
    attrs: Attrs<'a>,
}

impl<'a> Node<'a> {
    attr!(style, "style");

    attr!(shape, "shape");

    attr!(label, "label");

    attr!(border_count, "peripheries");
}

#[derive(Debug, Default)]
pub struct Edge<'a> {
    attrs: Attrs<'a>,
}

impl<'a> Edge<'a> {
    attr!(style, "style");

    attr!(label, "label");
}
