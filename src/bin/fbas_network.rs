extern crate fbas_network;

use fbas_network::*;

use quicli::prelude::*;
use structopt::StructOpt;

use std::path::PathBuf;

/// Find failing nodes, the transitive quorum set and quorum slices of an FBAS (parses data from
/// stellarbeat.org)
#[derive(Debug, StructOpt)]
struct Cli {
    /// Path to JSON file describing the FBAS in stellarbeat.org "nodes" format
    nodes_path: Option<PathBuf>,

    /// Path to a stellarbeat.org "organizations" JSON file; needed for finding failing
    /// organizations
    #[structopt(short = "o", long = "organizations")]
    organizations_path: Option<PathBuf>,

    /// Output nodes that are failing, directly or because nodes they depend on are failing
    #[structopt(short = "f", long = "failing-nodes")]
    failing_nodes: bool,

    /// Output the transitive quorum set (the "top tier")
    #[structopt(short = "t", long = "transitive-quorum-set")]
    transitive_quorum_set: bool,

    /// Output strongly connected components of the trust graph
    #[structopt(short = "c", long = "strongly-connected-components")]
    strongly_connected_components: bool,

    /// Output organizations that lost too many validators; requires -o
    #[structopt(short = "g", long = "failing-organizations")]
    failing_organizations: bool,

    /// Output the quorum slices of the node with the given public key
    #[structopt(long = "slices")]
    slices_of: Option<PublicKey>,

    /// Output everything except slices
    #[structopt(short = "a", long = "all")]
    all: bool,

    /// Don't memoize generated slices by quorum set hash key
    #[structopt(long = "no-slice-cache")]
    no_slice_cache: bool,

    /// Silence the commentary about what is what and what it means
    #[structopt(short = "s", long = "silent")]
    silent: bool,

    /// In output, identify nodes by their public key; default is to use node IDs corresponding to
    /// indices in the input file
    #[structopt(short = "p", long = "output-pretty")]
    output_pretty: bool,

    #[structopt(flatten)]
    verbosity: Verbosity,
}

fn main() -> CliResult {
    let args = Cli::from_args();
    args.verbosity.setup_env_logger("fbas_network")?;

    let nodes = if let Some(nodes_path) = args.nodes_path {
        eprintln!("Reading nodes JSON from file...");
        Network::nodes_from_json_file(&nodes_path)?
    } else {
        eprintln!("Reading nodes JSON from STDIN...");
        Network::nodes_from_json_stdin()?
    };
    eprintln!("Loaded {} nodes.", nodes.len());
    let organizations = if let Some(organizations_path) = args.organizations_path {
        eprintln!("Reading organizations JSON from file...");
        let organizations = Organization::vec_from_json_file(&organizations_path)?;
        eprintln!("Loaded {} organizations.", organizations.len());
        organizations
    } else {
        vec![]
    };
    let has_organizations = !organizations.is_empty();

    let mut network = Network::new(nodes, organizations);
    if args.no_slice_cache {
        network.disable_slice_cache();
    }

    let (f, t, c, g) = (
        args.failing_nodes,
        args.transitive_quorum_set,
        args.strongly_connected_components,
        args.failing_organizations,
    );
    // -a  => output everything
    let (f, t, c, g) = if args.all {
        (true, true, true, has_organizations)
    } else {
        (f, t, c, g)
    };

    let silent = args.silent;
    // silenceable println
    macro_rules! silprintln {
        ($($tt:tt)*) => ({
            if !silent {
                println!($($tt)*);
            }
        })
    }
    let output_pretty = args.output_pretty;

    if (f, t, c, g) == (false, false, false, false) && args.slices_of.is_none() {
        eprintln!("Nothing to do... (try the -a flag?)");
    } else if !output_pretty {
        silprintln!(
            "In the following dumps, nodes are identified by their index in the input file."
        );
    }
    silprintln!(
        "\nThere are {} nodes in the network (including validators that are only referenced).\n",
        network.number_of_nodes()
    );

    if f {
        let failing_nodes = network.failing_nodes();
        silprintln!(
            "\n{} active nodes are failing (not validating, unable to reach their quorum set \
             threshold, or depending on such nodes).\n",
            failing_nodes.len()
        );
        println!(
            "failing_nodes: {}",
            format_node_ids(failing_nodes, &network, output_pretty)
        );
    }
    if t {
        if let Some(transitive_quorum_set) = network.transitive_quorum_set() {
            silprintln!(
                "\nThe transitive quorum set (the \"top tier\") consists of {} nodes.\n",
                transitive_quorum_set.len()
            );
            println!(
                "transitive_quorum_set: {}",
                format_node_ids(transitive_quorum_set, &network, output_pretty)
            );
        } else {
            silprintln!("\nThere is no transitive quorum set. Liveness is not guaranteed!\n");
            println!("transitive_quorum_set: null");
        }
    }
    if c {
        let components: Vec<NodeIdSet> = network
            .strongly_connected_components()
            .iter()
            .map(|component| component.nodes.clone())
            .collect();
        silprintln!(
            "\nWe found {} strongly connected components in the trust graph.\n",
            components.len()
        );
        println!(
            "strongly_connected_components: {}",
            format_node_id_sets(&components, &network, output_pretty)
        );
    }
    if g {
        if !has_organizations {
            eprintln!("Can't find failing organizations without organizations data (see -o).");
        } else {
            let failing_organizations: Vec<&Organization> = network
                .organizations()
                .iter()
                .filter(|&org| network.is_organization_failing(org))
                .collect();
            silprintln!(
                "\n{} organizations have too few available validators.\n",
                failing_organizations.len()
            );
            println!(
                "failing_organizations: {}",
                format_organizations(&failing_organizations)
            );
        }
    }
    if let Some(public_key) = args.slices_of {
        if let Some(node) = network.get_node_by_public_key(&public_key) {
            let slices = network.get_slices(node.quorum_set());
            silprintln!(
                "\nThe quorum set of {} is satisfied by {} minimal slices.\n",
                node.display_name(),
                slices.len()
            );
            println!("slices: {}", format_slices(&slices));
        } else {
            eprintln!("Unknown node: {}", public_key);
        }
    }
    silprintln!();
    Ok(())
}
