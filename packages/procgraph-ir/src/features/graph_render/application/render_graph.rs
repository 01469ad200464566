use crate::errors::Result;
use crate::features::graph_render::infrastructure::wrap_digraph;
use crate::features::graph_render::ports::GraphRenderer;

pub struct RenderGraphUseCase<R: GraphRenderer> {
    renderer: R,
}

impl<R: GraphRenderer> RenderGraphUseCase<R> {
    pub fn new(renderer: R) -> Self {
        Self { renderer }
    }

    /// Wrap an emitted body as `digraph <name>` and render it
    pub fn execute(&self, name: &str, body: &str) -> Result<Vec<u8>> {
        self.renderer.render(&wrap_digraph(name, body))
    }

    /// File name for a rendered graph, e.g. `Foo.bar_CFG.pdf`
    pub fn output_name(&self, procedure: &str, graph: &str) -> String {
        format!("{}_{}.{}", procedure, graph, self.renderer.format())
    }
}
