//! Cross-module tests for the prediction pipeline.
