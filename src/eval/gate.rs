//! Boolean function of each node type

use crate::NodeType;

/// Fold the inputs left to right; at least two inputs are required
fn compute_logic(
    inputs: &[Option<bool>],
    op: fn(bool, bool) -> bool,
    inv_out: bool,
) -> Option<bool> {
    if inputs.len() < 2 {
        return None;
    }
    let mut ret = inputs[0]?;
    for v in &inputs[1..] {
        ret = op(ret, (*v)?);
    }
    Some(ret ^ inv_out)
}

/// Compute the value of a node from the values of its drivers, in in-edge order
///
/// `own` is the value the current state assigns to the node itself, used by primary inputs
/// without drivers. Returns None when the arity does not match the node type, when an input is
/// unassigned, and for marker nodes.
pub fn compute_node(
    node_type: NodeType,
    inputs: &[Option<bool>],
    own: Option<bool>,
) -> Option<bool> {
    use NodeType::*;
    match node_type {
        PrimaryInput => match inputs.len() {
            0 => own,
            1 => inputs[0],
            _ => compute_logic(inputs, |a, b| a || b, false),
        },
        PrimaryOutput => match inputs {
            [x] => *x,
            _ => None,
        },
        Input | Output => None,
        Not => match inputs {
            [x] => x.map(|v| !v),
            _ => None,
        },
        And => compute_logic(inputs, |a, b| a && b, false),
        Nand => compute_logic(inputs, |a, b| a && b, true),
        Or => compute_logic(inputs, |a, b| a || b, false),
        Nor => compute_logic(inputs, |a, b| a || b, true),
        Xor => compute_logic(inputs, |a, b| a ^ b, false),
        Xnor => compute_logic(inputs, |a, b| a ^ b, true),
    }
}
