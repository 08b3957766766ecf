use ethers::prelude::*;

// Task registry ABI. Tasks reference an approved proposal; proposals are
// stored here once approved by the task issuer. The ABI is JSON rather than
// human-readable because the human-readable parser cannot express the
// `(uint256,uint256,address,uint256)[]` return of `getProposals`.
abigen!(
    TaskRegistry,
    r#"[
        {"type":"event","name":"TaskCreated","anonymous":false,"inputs":[{"name":"issuer","type":"address","indexed":true},{"name":"taskId","type":"uint256","indexed":true}]},
        {"type":"event","name":"TaskCompleted","anonymous":false,"inputs":[{"name":"taskId","type":"uint256","indexed":true},{"name":"result","type":"string","indexed":false}]},
        {"type":"event","name":"ProposalApproved","anonymous":false,"inputs":[{"name":"taskId","type":"uint256","indexed":true},{"name":"proposalId","type":"uint256","indexed":false}]},
        {"type":"function","name":"createTask","stateMutability":"nonpayable","inputs":[{"name":"prompt","type":"string"},{"name":"proposalId","type":"uint256"}],"outputs":[{"name":"","type":"uint256"}]},
        {"type":"function","name":"completeTask","stateMutability":"nonpayable","inputs":[{"name":"taskId","type":"uint256"},{"name":"result","type":"string"}],"outputs":[]},
        {"type":"function","name":"getTask","stateMutability":"view","inputs":[{"name":"taskId","type":"uint256"}],"outputs":[{"name":"","type":"uint256"},{"name":"","type":"string"},{"name":"","type":"address"},{"name":"","type":"address"},{"name":"","type":"uint256"},{"name":"","type":"uint8"},{"name":"","type":"string"}]},
        {"type":"function","name":"getTasksByOwner","stateMutability":"view","inputs":[{"name":"owner","type":"address"}],"outputs":[{"name":"","type":"uint256[]"}]},
        {"type":"function","name":"getProposals","stateMutability":"view","inputs":[{"name":"taskId","type":"uint256"}],"outputs":[{"name":"","type":"tuple[]","components":[{"name":"id","type":"uint256"},{"name":"taskId","type":"uint256"},{"name":"agent","type":"address"},{"name":"price","type":"uint256"}]}]},
        {"type":"function","name":"approveProposal","stateMutability":"nonpayable","inputs":[{"name":"taskId","type":"uint256"},{"name":"proposalId","type":"uint256"},{"name":"agent","type":"address"},{"name":"price","type":"uint256"}],"outputs":[]}
    ]"#
);
