use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyList;
use pyo3::wrap_pyfunction;

use crate::{notation::ARROW, types::RawTransaction, MiningError};

impl From<MiningError> for PyErr {
    fn from(err: MiningError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

#[pymodule]
fn apriori_hashtree(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(mine_frequent_itemsets, m)?)?;
    m.add_function(wrap_pyfunction!(mine_association_rules, m)?)?;
    Ok(())
}

/// Frequent itemsets as lists of labels.
#[pyfunction]
#[pyo3(text_signature = "(transactions, minsup)")]
fn mine_frequent_itemsets(transactions: Vec<RawTransaction>, minsup: f64) -> PyResult<Vec<Vec<String>>> {
    Ok(crate::mine_frequent_itemsets(&transactions, minsup)?)
}

/// Association rules as `[antecedent..., "=>", [consequent...]]`.
#[pyfunction]
#[pyo3(text_signature = "(transactions, minsup, minconf)")]
fn mine_association_rules(
    py: Python,
    transactions: Vec<RawTransaction>,
    minsup: f64,
    minconf: f64,
) -> PyResult<Vec<PyObject>> {
    crate::mine_association_rules(&transactions, minsup, minconf)?
        .into_iter()
        .map(|rule| {
            let row = PyList::new(py, &rule.antecedent);
            row.append(ARROW)?;
            row.append(PyList::new(py, &rule.consequent))?;
            Ok(row.to_object(py))
        })
        .collect()
}
