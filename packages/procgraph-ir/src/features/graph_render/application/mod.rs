mod render_graph;

pub use render_graph::RenderGraphUseCase;
