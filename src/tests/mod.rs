mod test_eigenmaps;
mod test_graph;
mod test_helpers;
mod test_seeds;
