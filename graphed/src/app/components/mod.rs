mod editor;
mod plotter;

pub use editor::Editor;
pub use plotter::PlotPanel;
