//! IO for .bench (ISCAS) style netlists

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Read, Write};

use crate::error::{Error, Result};
use crate::{Netlist, NodeId, NodeType};

/// A gate definition, `name = GATE(deps...)`
struct Statement {
    line: usize,
    name: String,
    gate: String,
    deps: Vec<String>,
}

fn parse_declaration(line: usize, t: &str) -> Result<(String, String)> {
    let parts: Vec<_> = t
        .split(&['(', ')'])
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
    if parts.len() != 2 {
        return Err(Error::parse(line, format!("Malformed declaration {t}")));
    }
    Ok((parts[0].to_uppercase(), parts[1].to_string()))
}

fn parse_statement(line: usize, t: &str) -> Result<Statement> {
    let parts: Vec<_> = t
        .split(&['=', '(', ',', ')'])
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
        .collect();
    if parts.len() < 2 {
        return Err(Error::parse(line, format!("Malformed statement {t}")));
    }
    Ok(Statement {
        line,
        name: parts[0].clone(),
        gate: parts[1].clone(),
        deps: parts[2..].to_vec(),
    })
}

fn netlist_from_statements(
    name: &str,
    statements: &[Statement],
    inputs: &[String],
    outputs: &[String],
) -> Result<Netlist> {
    let mut ret = Netlist::new(name);
    let mut name_to_node: HashMap<&str, NodeId> = HashMap::new();

    // Create all nodes first, so that statements may reference later definitions
    for i in inputs {
        let n = ret.add_input(i);
        if name_to_node.insert(i, n).is_some() {
            return Err(Error::parse(0, format!("{i} is defined twice")));
        }
    }
    for s in statements {
        let node_type = if outputs.contains(&s.name) {
            if !["BUF", "BUFF"].contains(&s.gate.to_uppercase().as_str()) || s.deps.len() != 1 {
                return Err(Error::parse(
                    s.line,
                    format!("Output {} must be defined as BUF(driver)", s.name),
                ));
            }
            NodeType::PrimaryOutput
        } else {
            let t: NodeType = s.gate.parse()?;
            if !t.is_gate() {
                return Err(Error::UnknownNodeType(s.gate.clone()));
            }
            t
        };
        let n = ret.add_node(&s.name, node_type);
        if name_to_node.insert(&s.name, n).is_some() {
            return Err(Error::parse(s.line, format!("{} is defined twice", s.name)));
        }
    }
    for o in outputs {
        if !statements.iter().any(|s| &s.name == o) {
            return Err(Error::parse(0, format!("Output {o} is not driven")));
        }
    }

    // Then connect them
    for s in statements {
        let dst = name_to_node[s.name.as_str()];
        for dep in &s.deps {
            let src = name_to_node.get(dep.as_str()).ok_or_else(|| {
                Error::parse(s.line, format!("Gate input {dep} is not generated anywhere"))
            })?;
            ret.connect(*src, dst);
        }
    }
    ret.check();
    Ok(ret)
}

/// Read a netlist in .bench format, as used by the ISCAS benchmarks
///
/// Gates may reference signals defined later in the file, so that latches can be described.
/// Primary outputs are nodes of their own, defined with a BUF statement:
/// ```text
///     # This is a comment
///     INPUT(s)
///     INPUT(r)
///     OUTPUT(y)
///     q = NOR(s, qb)
///     qb = NOR(r, q)
///     y = BUF(q)
/// ```
pub fn read_bench<R: Read>(name: &str, r: R) -> Result<Netlist> {
    let mut statements = Vec::new();
    let mut inputs = Vec::new();
    let mut outputs = Vec::new();
    for (i, l) in BufReader::new(r).lines().enumerate() {
        let line = i + 1;
        let s = l?;
        let t = s.trim();
        if t.is_empty() || t.starts_with('#') {
            continue;
        }
        if !t.contains('=') {
            let (keyword, signal) = parse_declaration(line, t)?;
            match keyword.as_str() {
                "INPUT" | "PINPUT" => inputs.push(signal),
                "OUTPUT" | "POUTPUT" => outputs.push(signal),
                _ => return Err(Error::parse(line, format!("Unknown keyword {keyword}"))),
            }
        } else {
            statements.push(parse_statement(line, t)?);
        }
    }
    netlist_from_statements(name, &statements, &inputs, &outputs)
}

/// Write a netlist in .bench format, in the dialect accepted by [`read_bench`]
///
/// Marker nodes and primary inputs with drivers cannot be represented and are rejected.
pub fn write_bench<W: Write>(w: &mut W, net: &Netlist) -> Result<()> {
    writeln!(w, "# .bench (ISCAS) file")?;
    writeln!(w, "# Netlist {}", net.name())?;
    for n in net.primary_inputs() {
        writeln!(w, "INPUT({})", net.node_name(n))?;
    }
    writeln!(w)?;
    for n in net.primary_outputs() {
        writeln!(w, "OUTPUT({})", net.node_name(n))?;
    }
    writeln!(w)?;
    for n in net.nodes() {
        let node_type = net.node_type(n);
        let rep = net
            .fanins(n)
            .map(|f| net.node_name(f))
            .collect::<Vec<_>>()
            .join(", ");
        match node_type {
            NodeType::PrimaryInput => {
                if net.fanins(n).next().is_some() {
                    return Err(Error::UnknownNodeType(node_type.to_string()));
                }
            }
            NodeType::PrimaryOutput => writeln!(w, "{} = BUF({})", net.node_name(n), rep)?,
            NodeType::Input | NodeType::Output => {
                return Err(Error::UnknownNodeType(node_type.to_string()));
            }
            _ => writeln!(w, "{} = {}({})", net.node_name(n), node_type, rep)?,
        }
    }
    Ok(())
}
