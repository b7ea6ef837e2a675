/// Find the [Minimum Spanning Tree (MST)](https://en.wikipedia.org/wiki/Minimum_spanning_tree)
pub mod mst;
/// Approximate the [Traveling Salesman Problem (TSP)](https://en.wikipedia.org/wiki/Travelling_salesman_problem)
pub mod tsp;
/// Solve the TSP exactly with [branch and bound](https://en.wikipedia.org/wiki/Branch_and_bound)
pub mod bnb;
