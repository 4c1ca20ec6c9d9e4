//! Contract interfaces targeted by batched writes.

use alloy::sol;

sol! {
    /// ERC-1155 contracts that can mint new tokens, or additional supply of existing ones, to a
    /// recipient.
    #[derive(Debug, PartialEq, Eq)]
    interface IMintableERC1155 {
        /// Mints `amount` of `tokenId` to `to`.
        ///
        /// A `tokenId` of `type(uint256).max` mints a new token whose metadata lives at `uri`.
        function mintTo(
            address to,
            uint256 tokenId,
            string calldata uri,
            uint256 amount
        ) external payable;
    }

    /// Contracts that execute several of their own calls atomically.
    #[derive(Debug, PartialEq, Eq)]
    interface IMulticall {
        /// Delegate-calls each entry of `data` on the contract itself.
        function multicall(bytes[] calldata data) external returns (bytes[] memory results);
    }
}
