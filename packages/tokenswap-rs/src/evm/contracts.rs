//! TokenSwap and ERC20 contract ABI definitions
//!
//! Uses alloy's sol! macro to generate type-safe bindings for the V1/V2 tokens
//! and the TokenSwap contract that exchanges them 1:1.

use alloy::sol;

sol! {
    /// TokenSwap contract interface
    #[sol(rpc)]
    contract TokenSwap {
        /// Token taken from the caller
        function v1Token() external view returns (address);

        /// Token paid out to the caller
        function v2Token() external view returns (address);

        /// Pull `amount` V1 from the caller (needs allowance) and send `amount` V2 back
        function bridge(uint256 amount) external;

        /// Same as `bridge(balanceOf(msg.sender))` on the V1 token
        function bridgeAll() external;

        event Bridged(address indexed account, uint256 amount);
    }

    /// Standard ERC20 interface
    #[sol(rpc)]
    contract ERC20 {
        function name() external view returns (string);
        function symbol() external view returns (string);
        function decimals() external view returns (uint8);
        function totalSupply() external view returns (uint256);
        function balanceOf(address account) external view returns (uint256);
        function transfer(address to, uint256 amount) external returns (bool);
        function allowance(address owner, address spender) external view returns (uint256);
        function approve(address spender, uint256 amount) external returns (bool);
        function transferFrom(address from, address to, uint256 amount) external returns (bool);

        event Transfer(address indexed from, address indexed to, uint256 value);
        event Approval(address indexed owner, address indexed spender, uint256 value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::U256;
    use alloy::sol_types::SolCall;

    #[test]
    fn test_selectors() {
        assert_eq!(TokenSwap::bridgeCall::SIGNATURE, "bridge(uint256)");
        assert_eq!(TokenSwap::bridgeAllCall::SIGNATURE, "bridgeAll()");
        assert_eq!(ERC20::approveCall::SELECTOR, [0x09, 0x5e, 0xa7, 0xb3]);
        assert_eq!(ERC20::balanceOfCall::SELECTOR, [0x70, 0xa0, 0x82, 0x31]);
    }

    #[test]
    fn test_bridge_calldata() {
        let call = TokenSwap::bridgeCall {
            amount: U256::from(100u64),
        };
        let data = call.abi_encode();
        assert_eq!(data.len(), 4 + 32);
        assert_eq!(data[35], 100);
    }
}
