//! Built-in question bank: AI and Python for data science.

use super::engine::Question;

struct Entry {
    prompt: &'static str,
    options: [&'static str; 4],
    correct: u8,
}

const fn entry(prompt: &'static str, options: [&'static str; 4], correct: u8) -> Entry {
    assert!(correct < 4, "correct index out of range");
    Entry {
        prompt,
        options,
        correct,
    }
}

const ENTRIES: &[Entry] = &[
    // Python libraries
    entry(
        "Which Python library is considered the gold standard for machine learning?",
        ["NumPy", "scikit-learn", "Matplotlib", "Pandas"],
        1,
    ),
    entry(
        "What data type does NumPy mainly use for mathematical operations?",
        ["Standard Python lists", "Multidimensional arrays", "Dictionaries", "Strings"],
        1,
    ),
    entry(
        "Which Python library is best suited to manipulating and analysing tabular data?",
        ["SciPy", "Pandas", "Seaborn", "TensorFlow"],
        1,
    ),
    entry(
        "Which Python library is mainly used for linear algebra and scientific computing?",
        ["Math", "NumPy", "Statistics", "Random"],
        1,
    ),
    entry(
        "Which Python library specialises in data visualisation?",
        ["Scikit-learn", "Matplotlib", "Requests", "BeautifulSoup"],
        1,
    ),
    // machine learning fundamentals
    entry(
        "Which kind of learning uses labelled data to train a model?",
        ["Unsupervised learning", "Supervised learning", "Reinforcement learning", "Deep learning"],
        1,
    ),
    entry(
        "Which algorithm is commonly used for binary classification?",
        ["K-Means", "Random Forest", "Linear Regression", "DBSCAN"],
        1,
    ),
    entry(
        "In machine learning, what does 'overfitting' mean?",
        [
            "The model is too simple",
            "The model works well on new data",
            "The model memorises the training data",
            "The model is very fast",
        ],
        2,
    ),
    entry(
        "Which metric is commonly used to evaluate a classification model?",
        ["Mean Squared Error", "Accuracy", "BLEU Score", "Perplexity"],
        1,
    ),
    entry(
        "What does data normalisation do in machine learning?",
        [
            "Increases the size of the data",
            "Reduces the error",
            "Reduces the range of values",
            "Increases the speed",
        ],
        2,
    ),
    // deep learning
    entry(
        "What is the basic unit of an artificial neural network?",
        ["Node", "Perceptron", "Layer", "Bias"],
        1,
    ),
    entry(
        "Which Python library is the most popular for deep learning?",
        ["NumPy", "TensorFlow", "Requests", "Matplotlib"],
        1,
    ),
    entry(
        "In a neural network, what does the activation function do?",
        [
            "Initialises the weights",
            "Decides whether a neuron fires",
            "Computes the error",
            "Updates the parameters",
        ],
        1,
    ),
    entry(
        "Which kind of neural network is particularly effective for images?",
        ["RNN", "CNN", "LSTM", "Transformer"],
        1,
    ),
    entry(
        "What does 'backpropagation' mean?",
        [
            "Forward propagation of data",
            "Computing the gradient backwards",
            "Manually updating the weights",
            "Splitting the data",
        ],
        1,
    ),
    entry(
        "In a neural network, what do the weights represent?",
        [
            "Parameters setting the importance of connections",
            "The input data",
            "The activation functions",
            "The number of neurons",
        ],
        0,
    ),
    entry(
        "What is the main advantage of using more layers in a neural network?",
        ["Higher speed", "Less overfitting", "Greater flexibility", "Less memory"],
        2,
    ),
    entry(
        "What does a dropout layer do in a neural network?",
        [
            "Adds more neurons",
            "Randomly switches some neurons off",
            "Raises the learning rate",
            "Changes the activation function",
        ],
        1,
    ),
    entry(
        "Which problem do RNNs (Recurrent Neural Networks) address?",
        [
            "Image classification",
            "Processing time sequences",
            "Speech recognition",
            "All of the above",
        ],
        3,
    ),
    // computer vision
    entry(
        "Which Python library specialises in computer vision?",
        ["OpenCV", "Pandas", "Requests", "Flask"],
        0,
    ),
    entry(
        "In image recognition, what are 'features'?",
        [
            "The image dimensions",
            "The distinctive traits extracted",
            "The colour of the image",
            "The resolution",
        ],
        1,
    ),
    entry(
        "Which technique is commonly used to reduce the dimensionality of image data?",
        ["PCA", "K-Means", "Random Forest", "Linear Regression"],
        0,
    ),
    entry(
        "What does convolution do in a CNN?",
        [
            "Reduces the dimensions",
            "Extracts local features",
            "Increases the contrast",
            "Improves the resolution",
        ],
        1,
    ),
    // natural language processing
    entry(
        "Which Python library is most used for NLP?",
        ["NumPy", "NLTK", "Matplotlib", "Requests"],
        1,
    ),
    entry(
        "What does 'tokenisation' mean in NLP?",
        [
            "Machine translation",
            "Splitting text into smaller units",
            "Text classification",
            "Sentiment analysis",
        ],
        1,
    ),
    entry(
        "Which model is considered a breakthrough in NLP?",
        ["Word2Vec", "Transformer", "CNN", "K-Means"],
        1,
    ),
    entry(
        "What does the 'Bag of Words' technique do?",
        [
            "Sorts words alphabetically",
            "Represents text as a set of words",
            "Translates the text",
            "Improves the grammar",
        ],
        1,
    ),
    entry(
        "What is sentiment analysis?",
        [
            "Grammatical analysis",
            "Detecting emotions in text",
            "Machine translation",
            "Speech recognition",
        ],
        1,
    ),
    // data science and statistics
    entry(
        "Which statistic measures how spread out data is around the mean?",
        ["Mean", "Median", "Standard deviation", "Mode"],
        2,
    ),
    entry(
        "What does linear regression do?",
        [
            "Finds a linear relationship between variables",
            "Classifies the data",
            "Reduces dimensionality",
            "Clusters the data",
        ],
        0,
    ),
    entry(
        "In AI, what does 'feature engineering' mean?",
        [
            "Designing new algorithms",
            "Selecting and transforming features",
            "Increasing speed",
            "Improving visualisation",
        ],
        1,
    ),
    entry(
        "Which technique is used to validate an ML model?",
        ["Training set", "Test set", "Cross-validation", "Bias-variance tradeoff"],
        2,
    ),
    entry(
        "What does the 'ROC curve' represent?",
        [
            "The learning curve",
            "The trade-off between sensitivity and specificity",
            "The data distribution",
            "The model accuracy",
        ],
        1,
    ),
    // ethics
    entry(
        "In AI, what does 'bias' mean?",
        [
            "Systematic error in data or models",
            "Computation speed",
            "Algorithm complexity",
            "Dataset size",
        ],
        0,
    ),
    entry(
        "What is a core principle of responsible AI?",
        [
            "Maximising accuracy",
            "Transparency and fairness",
            "Execution speed",
            "Code simplicity",
        ],
        1,
    ),
    entry(
        "What makes a dataset 'balanced' for classification?",
        [
            "Equal representation of the classes",
            "Large size",
            "High quality",
            "Low complexity",
        ],
        0,
    ),
    // advanced topics
    entry(
        "What is 'transfer learning'?",
        [
            "Improving the weights",
            "Reusing pre-trained models",
            "Increasing speed",
            "Reducing overfitting",
        ],
        1,
    ),
    entry(
        "What does the gradient descent algorithm do?",
        [
            "Updates parameters to minimise the error",
            "Increases accuracy",
            "Speeds up training",
            "Reduces complexity",
        ],
        0,
    ),
    entry(
        "Which technique is used to reduce overfitting?",
        [
            "Adding more data",
            "Regularisation",
            "Using more features",
            "Increasing complexity",
        ],
        1,
    ),
    entry(
        "What sets deep learning apart from traditional machine learning?",
        [
            "It uses deep neural networks",
            "It is faster",
            "It uses less data",
            "It is simpler",
        ],
        0,
    ),
    entry(
        "In reinforcement learning, what does the 'reward function' represent?",
        [
            "The learning speed",
            "The feedback for actions",
            "The complexity of the environment",
            "The type of algorithm",
        ],
        1,
    ),
];

/// The built-in catalog; ids are positions in the bank.
pub fn builtin() -> anyhow::Result<Vec<Question>> {
    ENTRIES
        .iter()
        .enumerate()
        .map(|(id, e)| Question::new(id, e.prompt, e.options.map(str::to_string), e.correct))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_is_well_formed() {
        let questions = builtin().unwrap();
        assert_eq!(questions.len(), 41);
        for (i, q) in questions.iter().enumerate() {
            assert_eq!(q.id, i);
            assert!(q.correct_index < 4);
            assert!(!q.prompt.is_empty());
            assert!(q.options.iter().all(|o| !o.is_empty()));
        }
        let prompts: HashSet<_> = questions.iter().map(|q| q.prompt.as_str()).collect();
        assert_eq!(prompts.len(), questions.len());
    }
}
