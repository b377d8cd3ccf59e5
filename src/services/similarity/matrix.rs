/// Dense, symmetric N×N table of pairwise similarity scores
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    size: usize,
    scores: Vec<f64>,
}

impl SimilarityMatrix {
    /// Builds the matrix by scoring each unordered pair once
    ///
    /// `score(i, j)` is only called with `i <= j`; the lower triangle mirrors
    /// the upper one so symmetry holds exactly.
    pub fn from_pairs(size: usize, mut score: impl FnMut(usize, usize) -> f64) -> Self {
        let mut scores = vec![0.0; size * size];

        for i in 0..size {
            for j in i..size {
                let value = score(i, j);
                scores[i * size + j] = value;
                scores[j * size + i] = value;
            }
        }

        Self { size, scores }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.scores[i * self.size + j]
    }

    /// Scores of record `i` against every record, in catalog order
    pub fn row(&self, i: usize) -> &[f64] {
        let start = i * self.size;
        &self.scores[start..start + self.size]
    }
}
